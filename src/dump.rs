//! Non-interactive search: run one lookup and print the notes.

use anyhow::bail;
use std::io::{self, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;

use crate::args::{DumpArgs, DumpFormat};
use crate::client::{NotesClient, TokioDispatcher};
use crate::notes::sanitize::escape_markup;
use crate::notes::{BrowserPhase, DateDisplay, FetchCompletion, NoteDisplay, NoteSetController};

/// Slack on top of the request timeout before giving up on a completion.
const COMPLETION_GRACE: Duration = Duration::from_secs(5);

/// Search, wait for the answer, and write the notes to `out`.
///
/// Fails when the search is rejected or the request fails. An empty result
/// prints nothing and succeeds.
pub fn run(
    runtime: Handle,
    client: Arc<NotesClient>,
    dates: DateDisplay,
    args: &DumpArgs,
    out: &mut impl Write,
) -> anyhow::Result<usize> {
    let wait = client.request_timeout() + COMPLETION_GRACE;
    let (tx, rx) = mpsc::channel();
    let dispatcher = TokioDispatcher::new(runtime, client, move |completion| {
        let _ = tx.send(completion);
    });
    let mut controller = NoteSetController::new(Box::new(dispatcher), dates);

    let seq = controller.on_search(&args.mrn, &args.after)?;
    // Only one request is issued, so the first completion is ours.
    let completion = wait_for_completion(&rx, wait)?;
    debug_assert_eq!(completion.seq, seq);
    controller.on_response(completion.seq, completion.result);

    if let BrowserPhase::Failed { message } = controller.phase() {
        bail!("{message}");
    }
    let count = write_notes(&mut controller, args.format, out)?;
    Ok(count)
}

/// Block until the request completes. The sender stays alive inside the
/// dispatcher, so a lost fetch task shows up only as a timeout.
fn wait_for_completion(
    rx: &Receiver<FetchCompletion>,
    wait: Duration,
) -> anyhow::Result<FetchCompletion> {
    match rx.recv_timeout(wait) {
        Ok(completion) => Ok(completion),
        Err(RecvTimeoutError::Timeout) => {
            bail!("Notes request did not complete within {}s", wait.as_secs())
        }
        Err(RecvTimeoutError::Disconnected) => {
            bail!("Notes request was dropped before completing")
        }
    }
}

/// Write every loaded note, walking the set from the current position.
pub fn write_notes(
    controller: &mut NoteSetController,
    format: DumpFormat,
    out: &mut impl Write,
) -> io::Result<usize> {
    if controller.store().is_empty() {
        return Ok(0);
    }

    match format {
        DumpFormat::Text => {
            if let Some(label) = &controller.view().patient_label {
                writeln!(out, "{label}")?;
            }
            loop {
                let view = controller.view();
                if let Some((index, total)) = view.position {
                    writeln!(out)?;
                    writeln!(
                        out,
                        "== [{}/{}] {} | {}",
                        index + 1,
                        total,
                        view.note_type,
                        view.note_date
                    )?;
                    writeln!(out, "{}", view.body)?;
                }
                if !controller.on_next() {
                    break;
                }
            }
        }
        DumpFormat::Json => {
            for note in controller.store().notes() {
                serde_json::to_writer(&mut *out, note).map_err(io::Error::other)?;
                writeln!(out)?;
            }
        }
        DumpFormat::Html => {
            let view = controller.view();
            writeln!(out, "<!DOCTYPE html>")?;
            writeln!(out, "<html><head><meta charset=\"utf-8\"><title>Notes</title></head><body>")?;
            if let Some(label) = &view.patient_label {
                writeln!(out, "<h1>{}</h1>", escape_markup(label))?;
            }
            let dates = controller.dates().clone();
            for note in controller.store().notes() {
                let display = NoteDisplay::of(note, &dates);
                writeln!(
                    out,
                    "<article><h2>{}</h2><time>{}</time><pre>{}</pre></article>",
                    escape_markup(&display.note_type),
                    escape_markup(&display.date),
                    escape_markup(&display.body)
                )?;
            }
            writeln!(out, "</body></html>")?;
        }
    }

    Ok(controller.store().len())
}
