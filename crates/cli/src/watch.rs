use std::sync::mpsc;

use camino::Utf8Path;
use notify::{RecursiveMode, Watcher};
use postlist_lib::ListerConfig;
use tracing::{debug, error, info};

// Let's keep the possible events simpler for our needs
#[derive(Debug, PartialEq)]
enum FsEvent {
    Rename,
    Edit,
    Create,
    Delete,
    Ignored,
    Unhandled(notify::EventKind),
}

impl From<notify::EventKind> for FsEvent {
    fn from(event_kind: notify::EventKind) -> Self {
        use notify::event::{CreateKind, DataChange, EventKind, ModifyKind, RemoveKind};
        match event_kind {
            EventKind::Modify(ModifyKind::Name(_)) => Self::Rename,
            EventKind::Modify(
                ModifyKind::Data(DataChange::Content | DataChange::Any) | ModifyKind::Any,
            ) => Self::Edit,
            EventKind::Remove(RemoveKind::File | RemoveKind::Any) => Self::Delete,
            EventKind::Create(CreateKind::File | CreateKind::Any) => Self::Create,
            EventKind::Access(_) | EventKind::Modify(ModifyKind::Metadata(_)) => Self::Ignored,
            unhandled => Self::Unhandled(unhandled),
        }
    }
}

/// Whether `event` could change the listing.
fn touches_articles(event: &notify::Event, extensions: &[String]) -> bool {
    let fs_event = FsEvent::from(event.kind);
    match fs_event {
        FsEvent::Rename | FsEvent::Edit | FsEvent::Create | FsEvent::Delete => {}
        FsEvent::Ignored => return false,
        FsEvent::Unhandled(kind) => {
            debug!("unhandled watch event: {kind:?}");
            return false;
        }
    }
    event.paths.iter().any(|path| {
        Utf8Path::from_path(path)
            .is_some_and(|path| postlist_lib::is_article_path(path, extensions))
    })
}

/// Calls `relist` whenever an article file in the configured directory changes.
/// Blocks until the watcher shuts down.
pub fn run(config: &ListerConfig, mut relist: impl FnMut()) -> anyhow::Result<()> {
    let (tx, rx) = mpsc::channel::<notify::Result<notify::Event>>();

    let mut watcher = notify::recommended_watcher(tx)?;

    watcher.watch(config.dir.as_std_path(), RecursiveMode::NonRecursive)?;

    info!("Watching {} for changes", config.dir);

    for event in rx {
        match event {
            Ok(event) => {
                if touches_articles(&event, &config.extensions) {
                    debug!("relisting after {:?} on {:?}", event.kind, event.paths);
                    relist();
                }
            }
            Err(err) => error!("watch error: {err:?}"),
        }
    }

    Ok(())
}
