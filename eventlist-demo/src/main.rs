use std::fs::File;

use eventlist::{ArrayEventList, EventList, EventListExt, Result};
use eventlist_table::{ChangeStrategy, ObjectListTable, TableConfig};
use simplelog::{Config, LevelFilter, WriteLogger};

#[derive(Debug, Clone, PartialEq)]
struct Task {
    title: &'static str,
    priority: u8,
    done: bool,
}

impl Task {
    fn new(title: &'static str, priority: u8) -> Self {
        Self {
            title,
            priority,
            done: false,
        }
    }
}

fn render(task: &Task) -> String {
    format!("[P{}] {}", task.priority, task.title)
}

fn print_page(label: &str, rows: &[String]) {
    println!("{label}:");
    for row in rows {
        println!("  {row}");
    }
}

fn run() -> Result<()> {
    let tasks = ArrayEventList::with_items(vec![
        Task::new("write parser", 2),
        Task::new("fix flaky test", 1),
        Task::new("update docs", 4),
        Task::new("review patch", 3),
    ]);

    let open = tasks.filtered(|task| !task.done);
    let by_priority = open.sorted(|a, b| a.priority.cmp(&b.priority));
    let page = by_priority.ranged(0, 3);
    let least_urgent = by_priority.reversed();

    let config = TableConfig::new("open-tasks").change_strategy(ChangeStrategy::Identity);
    let table = ObjectListTable::with_config(page.clone(), render, config);
    let backlog = ObjectListTable::new(least_urgent.clone(), render);
    print_page("first page", &table.rows());

    tasks.push(Task::new("triage inbox", 0))?;
    print_page("after new urgent task", &table.rows());

    let mut finished = tasks.get(1)?;
    finished.done = true;
    tasks.set(1, finished)?;
    print_page("after closing a task", &table.rows());

    page.set_start(3);
    print_page("second page", &table.rows());

    by_priority.set_comparator(|a, b| a.title.cmp(b.title));
    page.set_start(0);
    print_page("first page by title", &table.rows());

    print_page("least urgent first", &backlog.rows());
    log::info!("[demo] {} open of {} tasks", open.size(), tasks.size());
    Ok(())
}

fn main() {
    let level = std::env::var("EVENTLIST_LOG")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(LevelFilter::Debug);
    let path = std::env::var("EVENTLIST_LOG_FILE").unwrap_or_else(|_| "eventlist-demo.log".into());

    let log_file = File::create(&path).expect("Failed to create log file");
    WriteLogger::init(level, Config::default(), log_file).expect("Failed to initialize logger");

    if let Err(e) = run() {
        log::error!("[demo] {}", e);
        eprintln!("Error: {}", e);
    }
}
