//! Subcommands and their execution against a restored player

use crate::config::Settings;
use crate::error::{CliError, Result};
use crate::transport::HeadlessTransport;
use clap::{Args, Subcommand, ValueEnum};
use songbox_core::time::{format_time, parse_duration};
use songbox_core::{
    LibraryQuery, RepeatMode, Song, SongDraft, SongId, SongPatch, SortKey, SortOrder, StateStore,
};
use songbox_playback::{Notice, Player, PlayerEvent};
use songbox_storage::{parse_import, ExportDocument, JsonFileStore, MemoryStore};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

/// Player type driven by the CLI
pub type CliPlayer = Player<HeadlessTransport, Box<dyn StateStore>>;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a song to the library
    Add(AddArgs),

    /// Edit fields of an existing song
    Edit(EditArgs),

    /// Delete a song from the library
    Rm {
        /// Song ID or unique ID prefix
        song: String,
    },

    /// Add the built-in sample songs
    Seed,

    /// List the library
    List(ListArgs),

    /// Show the play queue
    Queue,

    /// Append a song to the queue
    Enqueue {
        /// Song ID or unique ID prefix
        song: String,
    },

    /// Remove the queue entry at a 1-based position
    Dequeue { position: usize },

    /// Move a queue entry from one 1-based position to another
    Move { from: usize, to: usize },

    /// Move a queue entry one position earlier
    Up { position: usize },

    /// Move a queue entry one position later
    Down { position: usize },

    /// Empty the queue
    Clear,

    /// Play a song now
    Play {
        /// Song ID or unique ID prefix
        song: String,
    },

    /// Start the current or newest song
    ///
    /// Each invocation opens a fresh transport, so the current song is
    /// always reloaded and started. Pausing only applies to a long-lived
    /// host that keeps its transport between calls.
    Toggle,

    /// Skip to the next song
    Next,

    /// Go back to the previous song
    ///
    /// The position starts at zero on every invocation, so this never takes
    /// the restart-current branch a long-lived host takes past the restart
    /// threshold.
    Prev,

    /// Report that the current song finished playing
    Ended,

    /// Show, toggle or set shuffle
    Shuffle {
        #[arg(value_enum)]
        state: Option<Switch>,
    },

    /// Cycle or set the repeat mode
    Repeat {
        #[arg(value_enum)]
        mode: Option<RepeatArg>,
    },

    /// Import songs from a JSON export
    Import { file: PathBuf },

    /// Export persistent songs as JSON (stdout when no file is given)
    Export { file: Option<PathBuf> },

    /// Delete all songs and clear the queue
    Reset,

    /// Show the now playing song and modes
    Status,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long, default_value = "")]
    pub title: String,

    #[arg(long, default_value = "")]
    pub artist: String,

    #[arg(long, default_value = "")]
    pub album: String,

    #[arg(long, default_value = "")]
    pub cover: String,

    /// Audio source URL
    #[arg(long)]
    pub url: String,

    /// Duration as mm:ss
    #[arg(long)]
    pub duration: Option<String>,

    #[arg(long, default_value = "")]
    pub notes: String,

    /// Queue and start the song right away
    #[arg(long)]
    pub play: bool,

    /// Keep the song for this session only
    #[arg(long)]
    pub temporary: bool,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Song ID or unique ID prefix
    pub song: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub artist: Option<String>,

    #[arg(long)]
    pub album: Option<String>,

    #[arg(long)]
    pub cover: Option<String>,

    #[arg(long)]
    pub url: Option<String>,

    /// Duration as mm:ss; an empty value clears it
    #[arg(long)]
    pub duration: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Match against title, artist and album
    #[arg(long, short, default_value = "")]
    pub search: String,

    #[arg(long, value_enum, default_value_t = SortArg::Recent)]
    pub sort: SortArg,

    /// Ascending order
    #[arg(long, conflicts_with = "desc")]
    pub asc: bool,

    /// Descending order (default)
    #[arg(long)]
    pub desc: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Recent,
    Title,
    Artist,
    Album,
    Duration,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Recent => SortKey::Recent,
            SortArg::Title => SortKey::Title,
            SortArg::Artist => SortKey::Artist,
            SortArg::Album => SortKey::Album,
            SortArg::Duration => SortKey::Duration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RepeatArg {
    Off,
    One,
    All,
}

impl From<RepeatArg> for RepeatMode {
    fn from(arg: RepeatArg) -> Self {
        match arg {
            RepeatArg::Off => RepeatMode::Off,
            RepeatArg::One => RepeatMode::One,
            RepeatArg::All => RepeatMode::All,
        }
    }
}

/// Output of one command
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Report {
    /// Lines to print on stdout
    pub lines: Vec<String>,

    /// Notices raised by the player
    pub notices: Vec<Notice>,
}

/// Restore the player from the configured state file
///
/// With `dry_run` the saved state is read but changes are kept in memory.
pub fn open_player(settings: &Settings, dry_run: bool) -> Result<CliPlayer> {
    let file = JsonFileStore::new(&settings.storage.state_path);

    let store: Box<dyn StateStore> = if dry_run {
        debug!(path = %file.path().display(), "Dry run, changes will not be saved");
        Box::new(MemoryStore::with_state(file.read()?))
    } else {
        Box::new(file)
    };

    Ok(Player::restore(
        HeadlessTransport::new(),
        store,
        settings.playback.clone(),
    ))
}

/// Run `command` and collect what it printed and the notices it raised
pub fn execute(player: &mut CliPlayer, command: Command) -> Result<Report> {
    let mut lines = Vec::new();

    match command {
        Command::Add(args) => {
            let duration_sec = args.duration.as_deref().map(duration_arg).transpose()?;
            let draft = SongDraft {
                title: args.title,
                artist: args.artist,
                album: args.album,
                cover_url: args.cover,
                audio_url: args.url,
                duration_sec,
                notes: args.notes,
                ephemeral: args.temporary,
                ..SongDraft::default()
            };
            let id = player.add_song(draft, args.play)?;
            info!(song = %id, "Added song");
            lines.push(id.to_string());
        }

        Command::Edit(args) => {
            let id = resolve_song(player, &args.song)?;
            let duration_sec = match args.duration.as_deref() {
                Some(text) if text.trim().is_empty() => Some(None),
                Some(text) => Some(Some(duration_arg(text)?)),
                None => None,
            };
            let patch = SongPatch {
                title: args.title,
                artist: args.artist,
                album: args.album,
                cover_url: args.cover,
                audio_url: args.url,
                duration_sec,
                notes: args.notes,
            };
            player.update_song(&id, patch);
        }

        Command::Rm { song } => {
            let id = resolve_song(player, &song)?;
            if let Some(removed) = player.remove_song(&id) {
                lines.push(format!("Removed {}", removed.title));
            }
        }

        Command::Seed => player.seed_samples(),

        Command::List(args) => {
            let query = LibraryQuery {
                search: args.search,
                sort: args.sort.into(),
                order: if args.asc {
                    SortOrder::Asc
                } else {
                    SortOrder::Desc
                },
            };
            let now_playing = player.session().now_playing().cloned();
            for song in player.query(&query) {
                let marker = if now_playing.as_ref() == Some(&song.id) {
                    '>'
                } else {
                    ' '
                };
                lines.push(format!("{} {}", marker, song_line(song)));
            }
        }

        Command::Queue => {
            let now_playing = player.session().now_playing().cloned();
            for (index, id) in player.queue().ids().iter().enumerate() {
                let marker = if now_playing.as_ref() == Some(id) {
                    '>'
                } else {
                    ' '
                };
                let title = player
                    .library()
                    .get(id)
                    .map_or_else(|| id.to_string(), |song| song.title.clone());
                lines.push(format!("{}{:>3}. {}", marker, index + 1, title));
            }
        }

        Command::Enqueue { song } => {
            let id = resolve_song(player, &song)?;
            player.enqueue(&id);
        }

        Command::Dequeue { position } => {
            let index = queue_index(player, position)?;
            player.remove_from_queue(index);
        }

        Command::Move { from, to } => {
            let from = queue_index(player, from)?;
            let to = queue_index(player, to)?;
            player.move_in_queue(from, to);
        }

        Command::Up { position } => {
            let index = queue_index(player, position)?;
            player.move_up(index);
        }

        Command::Down { position } => {
            let index = queue_index(player, position)?;
            player.move_down(index);
        }

        Command::Clear => player.clear_queue(),

        Command::Play { song } => {
            let id = resolve_song(player, &song)?;
            player.play_by_id(&id);
        }

        Command::Toggle => player.toggle_play_pause(),

        Command::Next => player.next(true),

        Command::Prev => player.previous(),

        Command::Ended => player.on_ended(),

        Command::Shuffle { state } => match state {
            Some(Switch::On) => player.set_shuffle(true),
            Some(Switch::Off) => player.set_shuffle(false),
            None => player.toggle_shuffle(),
        },

        Command::Repeat { mode } => match mode {
            Some(mode) => player.set_repeat(mode.into()),
            None => player.cycle_repeat(),
        },

        Command::Import { file } => {
            let text = fs::read_to_string(&file)?;
            let songs = parse_import(&text)?;
            let count = player.import_songs(songs);
            lines.push(format!("Imported {} songs", count));
        }

        Command::Export { file } => {
            let json = ExportDocument::new(player.export_songs()).to_json()?;
            match file {
                Some(path) => {
                    fs::write(&path, json)?;
                    info!(path = %path.display(), "Exported library");
                }
                None => lines.push(json),
            }
        }

        Command::Reset => player.reset(),

        Command::Status => lines.extend(status_lines(player)),
    }

    let notices = player
        .drain_events()
        .into_iter()
        .filter_map(|event| match event {
            PlayerEvent::Notice(notice) => Some(notice),
            _ => None,
        })
        .collect();

    Ok(Report { lines, notices })
}

/// Resolve a song by exact ID or unique ID prefix
pub fn resolve_song(player: &CliPlayer, reference: &str) -> Result<SongId> {
    let reference = reference.trim();
    if reference.is_empty() {
        return Err(CliError::InvalidArgument("song reference is empty".to_string()));
    }

    let exact = SongId::new(reference);
    if player.library().contains(&exact) {
        return Ok(exact);
    }

    let mut matches = player
        .library()
        .all()
        .iter()
        .filter(|song| song.id.as_str().starts_with(reference));

    match (matches.next(), matches.next()) {
        (Some(song), None) => Ok(song.id.clone()),
        (Some(_), Some(_)) => Err(CliError::AmbiguousSong(reference.to_string())),
        (None, _) => Err(CliError::UnknownSong(reference.to_string())),
    }
}

fn queue_index(player: &CliPlayer, position: usize) -> Result<usize> {
    let len = player.queue().len();
    if position == 0 || position > len {
        return Err(CliError::InvalidArgument(format!(
            "queue position {} is out of range (1-{})",
            position, len
        )));
    }
    Ok(position - 1)
}

fn duration_arg(text: &str) -> Result<f64> {
    parse_duration(text).ok_or_else(|| {
        CliError::InvalidArgument(format!("'{}' is not a duration in mm:ss form", text))
    })
}

fn song_line(song: &Song) -> String {
    let duration = song
        .duration_sec
        .map_or_else(|| "--:--".to_string(), format_time);
    let temporary = if song.ephemeral { " (temporary)" } else { "" };
    format!(
        "{:<10} {:>6}  {} - {}{}",
        short_id(&song.id),
        duration,
        song.title,
        song.subtitle(),
        temporary
    )
}

fn short_id(id: &SongId) -> &str {
    let id = id.as_str();
    id.char_indices().nth(8).map_or(id, |(end, _)| &id[..end])
}

fn status_lines(player: &CliPlayer) -> Vec<String> {
    let session = player.session();
    let mut lines = Vec::new();

    match player.now_playing_song() {
        Some(song) => {
            let position = player
                .queue()
                .position(&song.id)
                .map_or_else(String::new, |index| {
                    format!(" [{}/{}]", index + 1, player.queue().len())
                });
            lines.push(format!("Now playing: {} - {}{}", song.title, song.subtitle(), position));
        }
        None => lines.push("Now playing: nothing".to_string()),
    }

    lines.push(format!(
        "Shuffle: {}  Repeat: {}  Volume: {}",
        if session.shuffle() { "on" } else { "off" },
        session.repeat(),
        player.volume()
    ));
    lines.push(format!(
        "Library: {} songs  Queue: {} songs",
        player.library().len(),
        player.queue().len()
    ));

    lines
}
