use crate::client::{NotesClient, TokioDispatcher};
use crate::notes::{DateDisplay, NoteSetController};
use crate::ui::app::App;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::handle_key;
use crate::ui::layout::layout_regions;
use crate::ui::render::draw;
use crate::ui::search::SearchFormIntent;
use crate::ui::terminal_guard::setup_terminal;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;

/// Initial contents of the search form.
#[derive(Debug, Clone, Default)]
pub struct Prefill {
    pub patient_id: Option<String>,
    pub after: Option<String>,
    /// Submit immediately when both fields are present.
    pub submit: bool,
}

/// Run the interactive browser until the user quits.
///
/// Requests run on `runtime`; their completions come back through the
/// event queue so every state change happens on this thread.
pub fn run(
    runtime: Handle,
    client: Arc<NotesClient>,
    dates: DateDisplay,
    prefill: Prefill,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let events = EventHandler::new(tick_rate);

    let completions = events.sender();
    let dispatcher = TokioDispatcher::new(runtime, client, move |completion| {
        let _ = completions.send(AppEvent::NotesFetched(completion));
    });
    let mut app = App::new(NoteSetController::new(Box::new(dispatcher), dates));
    app.dispatch_form(SearchFormIntent::Prefill {
        patient_id: prefill.patient_id.unwrap_or_default(),
        after: prefill.after.unwrap_or_default(),
    });
    if prefill.submit && app.form().is_complete() {
        app.submit_search();
    }

    let (mut terminal, guard) = setup_terminal()?;
    loop {
        terminal.draw(|frame| {
            app.set_body_area(layout_regions(frame.area()).body);
            draw(frame, &app);
        })?;
        if app.should_quit() {
            break;
        }

        match events.next(tick_rate) {
            Ok(AppEvent::Key(key)) => handle_key(&mut app, key),
            Ok(AppEvent::NotesFetched(completion)) => {
                app.on_fetch_complete(completion);
            }
            Ok(AppEvent::Tick) | Ok(AppEvent::Resize(..)) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    drop(guard);
    Ok(())
}
