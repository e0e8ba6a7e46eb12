//! Shows how dropping a selection onto a queue snapshot would be carried out:
//! the moves sent to the backend, and the queue they produce.
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{ArgGroup, Parser};
use waxwing_core::{
    DropTarget, InMemoryQueue, Modifier, MoveInstruction, QueueBackend, SongList,
    config::Config,
    execute_plan,
    util::cluster_duration_string,
    waxwing_state::{Song, SongId},
};

#[derive(Parser, Debug)]
#[command(version, about)]
#[command(group(ArgGroup::new("target").required(true).args(["before", "after", "over"])))]
struct Args {
    /// A JSON file containing the queue as an array of songs.
    queue: PathBuf,

    /// The IDs of the songs to select, in any order.
    #[arg(short, long, value_delimiter = ',', required = true)]
    select: Vec<u32>,

    /// Drop immediately before this song.
    #[arg(long)]
    before: Option<u32>,

    /// Drop immediately after this song.
    #[arg(long)]
    after: Option<u32>,

    /// Drop onto this song's row, at `--pointer-y` below its top.
    #[arg(long, requires = "pointer_y")]
    over: Option<u32>,

    #[arg(long)]
    pointer_y: Option<f32>,

    #[arg(long, default_value_t = 24.0)]
    row_height: f32,

    /// The config file to read drag settings from.
    #[arg(long, default_value = Config::FILENAME)]
    config: PathBuf,

    /// Print the plan as JSON instead of a listing.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("waxwing_core=info,waxwing_plan=info")
            }),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::load(&args.config)
        .with_context(|| format!("failed to load {}", args.config.display()))?;

    let contents = std::fs::read_to_string(&args.queue)
        .with_context(|| format!("failed to read {}", args.queue.display()))?;
    let songs: Vec<Song> = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse {}", args.queue.display()))?;
    tracing::info!("Loaded {} songs from {}", songs.len(), args.queue.display());

    let mut list = SongList::queue(&config.song_list);
    list.replace(songs.clone());
    for id in &args.select {
        anyhow::ensure!(
            list.songs().contains(SongId(*id)),
            "song {id} is not in the queue"
        );
        if !list.is_selected(SongId(*id)) {
            list.mark_song(Modifier::Ctrl, SongId(*id));
        }
    }

    let drop = match (args.before, args.after, args.over) {
        (Some(id), _, _) => DropPoint::At(DropTarget::Before(SongId(id))),
        (_, Some(id), _) => DropPoint::At(DropTarget::After(SongId(id))),
        (_, _, Some(id)) => DropPoint::Over {
            song: SongId(id),
            pointer_y: args.pointer_y.unwrap_or_default(),
            row_height: args.row_height,
        },
        _ => anyhow::bail!("no drop target given"),
    };
    anyhow::ensure!(
        list.songs().contains(drop.song()),
        "song {} is not in the queue",
        drop.song()
    );
    let (target, plan) = plan_drop(&mut list, drop);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    match target {
        Some(target) => println!("Dropping {} songs at {target:?}", args.select.len()),
        None => println!("No drop target"),
    }
    if plan.is_empty() {
        println!("Nothing to move.");
        return Ok(());
    }
    for MoveInstruction { song, target_index } in &plan {
        println!("  move {song} -> {target_index}");
    }

    let mut queue = InMemoryQueue::new(songs);
    execute_plan(&mut queue, &plan)?;
    list.replace(queue.songs()?);

    println!();
    for cluster in list.clusters() {
        println!("{} [{}]", cluster.album, cluster_duration_string(cluster));
        for id in &cluster.songs {
            let Some(song) = list.songs().get(*id) else {
                continue;
            };
            let marker = if list.is_selected(*id) { '*' } else { ' ' };
            println!("  {marker} {:>4}  {}", song.id, song.display_title());
        }
    }
    Ok(())
}

/// Where the selection is dropped.
#[derive(Debug, Clone, Copy)]
enum DropPoint {
    /// Exactly at the given boundary.
    At(DropTarget),
    /// Wherever the configured row split puts a pointer over the song's row.
    Over {
        song: SongId,
        pointer_y: f32,
        row_height: f32,
    },
}
impl DropPoint {
    fn song(&self) -> SongId {
        match self {
            DropPoint::At(target) => target.song(),
            DropPoint::Over { song, .. } => *song,
        }
    }
}

fn plan_drop(list: &mut SongList, drop: DropPoint) -> (Option<DropTarget>, Vec<MoveInstruction>) {
    match drop {
        DropPoint::At(target) => (Some(target), list.drop_at(target)),
        DropPoint::Over {
            song,
            pointer_y,
            row_height,
        } => {
            list.begin_drag();
            list.drag_over(song, pointer_y, row_height);
            let target = list.drag_state().target;
            (target, list.finish_drag())
        }
    }
}
