use colored::Colorize;

use crate::cli::{open_tracker, FilterArgs};
use crate::clipboard::{CopyOutcome, SystemClipboard};
use crate::error::{PayError, Result};
use crate::i18n::strings;
use crate::settings::load_settings;

pub fn run(filter: &FilterArgs, print: bool) -> Result<()> {
    let view = filter.view()?;
    let settings = load_settings();
    let mut tracker = open_tracker(&settings)?;
    tracker.set_view(view);
    let text = strings(tracker.lang());

    let outcome = if print {
        tracker.report().map(|report| {
            println!("{report}");
            None
        })
    } else {
        tracker
            .copy_report(&SystemClipboard, &settings.report_fallback_path())
            .map(Some)
    };

    match outcome {
        Ok(None) => {}
        Ok(Some(CopyOutcome::Clipboard)) => println!("{}", text.report_copied.green()),
        Ok(Some(CopyOutcome::File(path))) => {
            println!("{} {}", text.report_saved_to.yellow(), path.display())
        }
        Err(PayError::EmptyReport) => println!("{}", text.no_entries),
        Err(e) => return Err(e),
    }
    Ok(())
}
