use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tether_core::prelude::*;

/// A counter and a name that survive restarts.
#[derive(Parser)]
#[command(name = "tether-counter", version)]
struct Cli {
    /// Store document to use instead of the platform data directory.
    #[arg(long)]
    store: Option<PathBuf>,

    /// Prefix applied to every key in the store.
    #[arg(long)]
    namespace: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the current state (default).
    Show,
    Inc {
        #[arg(default_value_t = 1)]
        by: i64,
    },
    Dec {
        #[arg(default_value_t = 1)]
        by: i64,
    },
    Reset,
    /// Set the name shown next to the count.
    Name { name: String },
}

struct CounterView {
    count: i64,
    name: String,
    set_count: Setter<i64>,
    set_name: Setter<String>,
}

fn counter_view() -> CounterView {
    let (count, set_count) = remember_persistent("count", 0i64);
    let (name, set_name) = remember_persistent("name", String::new());
    CounterView {
        count,
        name,
        set_count,
        set_name,
    }
}

fn apply(view: &CounterView, command: Command) {
    match command {
        Command::Show => {}
        Command::Inc { by } => view.set_count.update(|n| n.saturating_add(by)),
        Command::Dec { by } => view.set_count.update(|n| n.saturating_sub(by)),
        Command::Reset => view.set_count.set(0),
        Command::Name { name } => view.set_name.set(name),
    }
}

fn render(view: &CounterView) {
    if view.name.is_empty() {
        println!("Count: {}", view.count);
    } else {
        println!("{}'s count: {}", view.name, view.count);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = StoreConfig::new("tether-counter");
    if let Some(path) = cli.store {
        config = config.with_path(path);
    }
    if let Some(ns) = cli.namespace {
        config = config.with_namespace(ns);
    }
    log::info!("using store at {}", config.path().display());
    let store = config.open();

    let mut ui = Composition::new();
    let view = ui.compose(|| with_store(store.clone(), counter_view));

    apply(&view, cli.command.unwrap_or(Command::Show));

    // re-render with the committed values
    let view = ui.compose(|| with_store(store.clone(), counter_view));
    render(&view);

    ui.dispose();
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;

    fn mount(store: &Rc<dyn KeyValueStore>, ui: &mut Composition) -> CounterView {
        ui.compose(|| with_store(store.clone(), counter_view))
    }

    #[test]
    fn count_saturates_at_the_bounds() {
        let raw = MemoryStore::new();
        raw.set("count", &(i64::MAX - 1).to_string()).unwrap();
        let store: Rc<dyn KeyValueStore> = Rc::new(raw.clone());
        let mut ui = Composition::new();

        let view = mount(&store, &mut ui);
        apply(&view, Command::Inc { by: 5 });
        assert_eq!(mount(&store, &mut ui).count, i64::MAX);

        apply(&view, Command::Reset);
        apply(&view, Command::Dec { by: i64::MAX });
        apply(&view, Command::Dec { by: 10 });
        assert_eq!(mount(&store, &mut ui).count, i64::MIN);
        assert_eq!(raw.get("count").unwrap(), Some(i64::MIN.to_string()));
    }

    #[test]
    fn name_is_persisted() {
        let raw = MemoryStore::new();
        let store: Rc<dyn KeyValueStore> = Rc::new(raw.clone());
        let mut ui = Composition::new();

        let view = mount(&store, &mut ui);
        apply(&view, Command::Name { name: "Ada".into() });
        ui.dispose();

        let mut ui = Composition::new();
        let view = mount(&store, &mut ui);
        assert_eq!(view.name, "Ada");
        assert_eq!(view.count, 0);
    }
}
