pub mod cli;
pub mod render;
pub mod settings;

// Re-export core library
pub use jotter_core::*;

use crate::cli::{AddArgs, CliConfig, Command, ComposeArgs, EditArgs, ListArgs, ZoomAction};
use crate::settings::AppSettings;
use clap::Parser;
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

/// Everything a command needs, opened against one storage origin.
pub struct App {
    pub store: NotesStore<LocalNotesPersistence>,
    pub zoom: ZoomPreference,
    pub identity: DeviceIdentity,
    pub settings: AppSettings,
}

impl App {
    /// Opens the notes database under `settings.data_directory`.
    pub fn open(settings: AppSettings) -> std::result::Result<Self, String> {
        let path = settings.database_path();
        let kv = SqliteStore::open_or_create(&path).map_err(|e| {
            log::error!("failed to open {}: {e}", path.display());
            e.user_message()
        })?;
        Ok(Self::with_storage(Arc::new(kv), settings))
    }

    /// Builds the app over an already opened origin.
    pub fn with_storage(kv: Arc<dyn KeyValueStore>, settings: AppSettings) -> Self {
        let identity = DeviceIdentity::new(kv);
        let store = NotesStore::open(LocalNotesPersistence::new(identity.clone()));
        Self {
            store,
            zoom: ZoomPreference::new(identity.clone()),
            identity,
            settings,
        }
    }
}

fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .try_init();
}

fn write_line(
    out: &mut impl Write,
    text: impl std::fmt::Display,
) -> std::result::Result<(), String> {
    writeln!(out, "{text}").map_err(|e| format!("Failed to write output: {e}"))
}

fn resolve_settings(data_dir: Option<&Path>) -> AppSettings {
    let mut settings = settings::load_settings();
    if let Some(dir) = data_dir {
        settings.data_directory = dir.to_string_lossy().to_string();
    }
    settings
}

/// Parses the command line and runs the requested command.
pub fn run() -> std::result::Result<(), String> {
    init_logging();
    let cli = CliConfig::parse();
    let settings = resolve_settings(cli.data_dir.as_deref());
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if let Command::Settings { init } = cli.command {
        return show_settings(&settings, init, &mut out);
    }

    let mut app = App::open(settings)?;
    match cli.command {
        Command::Compose(args) => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()
                .map_err(|e| format!("Failed to start runtime: {e}"))?;
            runtime.block_on(compose(app, args, BufReader::new(tokio::io::stdin()), &mut out))
        }
        command => execute(&mut app, command, &mut out),
    }
}

fn show_settings(
    settings: &AppSettings,
    init: bool,
    out: &mut impl Write,
) -> std::result::Result<(), String> {
    let path = settings::settings_file_path();
    if init && !path.exists() {
        settings::save_settings_to(&path, settings)?;
        write_line(out, format!("wrote {}", path.display()))?;
    }
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| format!("Failed to serialize settings: {e}"))?;
    write_line(out, json)
}

/// Runs every synchronous command against `app`.
pub fn execute(
    app: &mut App,
    command: Command,
    out: &mut impl Write,
) -> std::result::Result<(), String> {
    match command {
        Command::List(args) => list(app, args, out),
        Command::Show { id } => {
            let note = app
                .store
                .get_note(&id)
                .ok_or_else(|| JotterError::NoteNotFound(id.clone()).to_string())?;
            write_line(out, render::render_note(note))
        }
        Command::Add(args) => add(app, args, out),
        Command::Edit(args) => edit(app, args, out),
        Command::Delete { id } => match app.store.delete_note(&id) {
            DeleteOutcome::Deleted => write_line(out, "Note deleted"),
            DeleteOutcome::NotFound => Err(JotterError::NoteNotFound(id).to_string()),
        },
        Command::Zoom { action } => zoom(app, action, out),
        Command::DeviceId => {
            let id = app.identity.device_id().map_err(|e| e.user_message())?;
            write_line(out, id)
        }
        Command::Settings { init } => show_settings(&app.settings, init, out),
        Command::Compose(_) => Err("compose reads from stdin and is only available through `run`".to_string()),
    }
}

fn list(app: &mut App, args: ListArgs, out: &mut impl Write) -> std::result::Result<(), String> {
    app.store.set_search_query(args.search);
    app.store.set_filter_option(args.filter);
    app.store.set_sort_option(args.sort);

    let notes = app.store.filtered_and_sorted_notes();
    if notes.is_empty() {
        return write_line(out, "No notes found");
    }
    for note in &notes {
        write_line(out, render::render_card(note))?;
    }
    Ok(())
}

fn add(app: &mut App, args: AddArgs, out: &mut impl Write) -> std::result::Result<(), String> {
    let mut editor = EditorSession::new_note(app.zoom.clone());
    editor.set_title(args.title);
    editor.set_content(args.content);
    if let Some(color) = args.color {
        editor.set_color(palette::lookup(&color));
    }
    if args.important {
        editor.toggle_important();
    }
    if let Some(zoom) = args.zoom {
        editor.set_font_zoom(zoom);
    }

    let note = editor.save(&mut app.store).map_err(|e| e.user_message())?;
    write_line(out, format!("Note created: {}", note.id))
}

fn edit(app: &mut App, args: EditArgs, out: &mut impl Write) -> std::result::Result<(), String> {
    if let Some(title) = &args.title {
        if title.trim().is_empty() {
            return Err("Please enter a title".to_string());
        }
    }
    let patch = NotePatch {
        title: args.title,
        content: args.content,
        color: args.color.as_deref().map(palette::lookup),
        important: args.important,
        font_zoom: args.zoom,
    };
    if patch.is_empty() {
        return Err("Nothing to change".to_string());
    }

    match app.store.update_note(&args.id, patch) {
        UpdateOutcome::Updated(note) => write_line(out, format!("Note saved: {}", note.id)),
        UpdateOutcome::NotFound => Err(JotterError::NoteNotFound(args.id).to_string()),
    }
}

fn zoom(
    app: &mut App,
    action: ZoomAction,
    out: &mut impl Write,
) -> std::result::Result<(), String> {
    let current = app.zoom.load();
    let next = match action {
        ZoomAction::Show => return write_line(out, format!("{current}%")),
        ZoomAction::In => (current + ZOOM_STEP).min(MAX_FONT_ZOOM),
        ZoomAction::Out => current.saturating_sub(ZOOM_STEP).max(MIN_FONT_ZOOM),
        ZoomAction::Reset => DEFAULT_FONT_ZOOM,
    };
    let stored = app.zoom.save(next).map_err(|e| e.user_message())?;
    write_line(out, format!("{stored}%"))
}

/// Builds a note from `input`, one line per edit, autosaving after each pause.
///
/// Returns once the input is exhausted and the last save has been written.
pub async fn compose<R>(
    app: App,
    args: ComposeArgs,
    input: R,
    out: &mut impl Write,
) -> std::result::Result<(), String>
where
    R: AsyncBufRead + Unpin,
{
    let App { store, zoom, settings, .. } = app;

    let editor = match &args.id {
        Some(id) => {
            let note = store
                .get_note(id)
                .ok_or_else(|| JotterError::NoteNotFound(id.clone()).to_string())?;
            EditorSession::open(note, zoom)
        }
        None if args.title.as_deref().map_or(true, |t| t.trim().is_empty()) => {
            return Err("Please enter a title".to_string());
        }
        None => EditorSession::new_note(zoom),
    };
    let editor = Arc::new(Mutex::new(editor));
    let store = store.into_shared();
    let mut debouncer = Debouncer::new(settings.autosave_config());

    if let Some(title) = args.title {
        let mut session = editor.lock().map_err(|_| "editor lock poisoned".to_string())?;
        session.set_title(title);
    }

    let mut lines = input.lines();
    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| format!("Failed to read input: {e}"))?
    {
        {
            let mut session = editor.lock().map_err(|_| "editor lock poisoned".to_string())?;
            let mut content = session.content().to_string();
            if !content.is_empty() {
                content.push('\n');
            }
            content.push_str(&line);
            session.set_content(content);
        }
        schedule_autosave(&mut debouncer, editor.clone(), store.clone());
    }

    debouncer.settle().await;

    let session = editor.lock().map_err(|_| "editor lock poisoned".to_string())?;
    match (session.note_id(), session.last_saved()) {
        (Some(id), Some(_)) => write_line(out, format!("Note saved: {id}")),
        _ => Err("Nothing saved".to_string()),
    }
}
