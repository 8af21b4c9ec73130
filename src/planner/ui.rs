use super::codec::iso_date;
use super::filter::TaskFilter;
use super::storage::TaskStore;
use super::task::{Priority, Status, Task};
use chrono::{Local, NaiveDate};
use colored::{ColoredString, Colorize};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use std::io::{self, Write};
use tracing::info;

const LINES_PER_TASK: usize = 3;

struct PlannerView {
    filter: TaskFilter,
    tasks: Vec<Task>,
    selected: usize,
}

impl PlannerView {
    fn new(store: &TaskStore) -> Self {
        let mut view = Self {
            filter: TaskFilter::All,
            tasks: Vec::new(),
            selected: 0,
        };
        view.refresh(store);
        view
    }

    fn refresh(&mut self, store: &TaskStore) {
        self.tasks = store.query(&self.filter);
        if self.selected >= self.tasks.len() {
            self.selected = self.tasks.len().saturating_sub(1);
        }
    }

    fn apply_filter(&mut self, store: &TaskStore, filter: TaskFilter) {
        info!(filter = %filter, "filter changed");
        self.filter = filter;
        self.selected = 0;
        self.refresh(store);
    }

    fn selected_task(&self) -> Option<&Task> {
        self.tasks.get(self.selected)
    }
}

pub fn run_planner(store: &mut TaskStore) -> Result<(), Box<dyn std::error::Error>> {
    let mut view = PlannerView::new(store);
    let mut stdout = io::stdout();

    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
    enable_raw_mode()?;

    let result = event_loop(&mut stdout, store, &mut view);

    disable_raw_mode()?;
    execute!(stdout, cursor::Show, LeaveAlternateScreen)?;
    result
}

fn event_loop(
    stdout: &mut io::Stdout,
    store: &mut TaskStore,
    view: &mut PlannerView,
) -> Result<(), Box<dyn std::error::Error>> {
    redraw(stdout, view)?;

    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Char('q') => break,

            KeyCode::Up => {
                view.selected = view.selected.saturating_sub(1);
            }

            KeyCode::Down => {
                if view.selected + 1 < view.tasks.len() {
                    view.selected += 1;
                }
            }

            KeyCode::Char('a') => {
                if let Some(task) = with_prompt_mode(stdout, prompt_new_task)? {
                    store.add(task);
                } else {
                    show_alert(
                        stdout,
                        "Missing Information",
                        "Task was not added: title, due date and priority are required.",
                    )?;
                }
                view.refresh(store);
            }

            KeyCode::Char('c') => {
                set_selected_status(stdout, store, view, Status::Completed, "mark as complete")?;
            }

            KeyCode::Char('o') => {
                set_selected_status(stdout, store, view, Status::Pending, "reopen")?;
            }

            KeyCode::Char('d') => match view.selected_task().cloned() {
                Some(task) => {
                    let confirmed = with_prompt_mode(stdout, || confirm_delete(&task))?;
                    if confirmed {
                        store.delete(&task);
                    }
                    view.refresh(store);
                }
                None => no_selection(stdout, "delete")?,
            },

            KeyCode::Char('p') => {
                if let Some(priority) = with_prompt_mode(stdout, || {
                    select_variant("Filter by priority", &Priority::ALL, 0)
                })? {
                    view.apply_filter(store, TaskFilter::Priority(priority));
                }
            }

            KeyCode::Char('s') => {
                if let Some(status) = with_prompt_mode(stdout, || {
                    select_variant("Filter by status", &Status::ALL, 0)
                })? {
                    view.apply_filter(store, TaskFilter::Status(status));
                }
            }

            KeyCode::Char('/') => {
                let keyword = with_prompt_mode(stdout, prompt_keyword)?;
                view.apply_filter(store, TaskFilter::Search(keyword));
            }

            KeyCode::Char('x') => view.apply_filter(store, TaskFilter::All),

            _ => continue,
        }

        redraw(stdout, view)?;
    }

    Ok(())
}

fn set_selected_status(
    stdout: &mut io::Stdout,
    store: &mut TaskStore,
    view: &mut PlannerView,
    status: Status,
    verb: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(mut task) = view.selected_task().cloned() else {
        return no_selection(stdout, verb);
    };
    task.set_status(status);
    store.update(&task);
    view.refresh(store);
    Ok(())
}

fn no_selection(stdout: &mut io::Stdout, verb: &str) -> Result<(), Box<dyn std::error::Error>> {
    show_alert(
        stdout,
        "No Task Selected",
        &format!("Please select a task to {}.", verb),
    )
}

/// Leaves raw mode for the duration of a dialoguer prompt.
fn with_prompt_mode<T>(
    stdout: &mut io::Stdout,
    prompt: impl FnOnce() -> Result<T, Box<dyn std::error::Error>>,
) -> Result<T, Box<dyn std::error::Error>> {
    disable_raw_mode()?;
    execute!(stdout, cursor::Show, cursor::MoveTo(0, 0), Clear(ClearType::All))?;

    let result = prompt();

    enable_raw_mode()?;
    execute!(stdout, cursor::Hide)?;
    result
}

fn show_alert(
    stdout: &mut io::Stdout,
    title: &str,
    message: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    execute!(stdout, cursor::MoveTo(0, 0), Clear(ClearType::All))?;
    write!(
        stdout,
        "⚠️  {}\r\n\r\n{}\r\n\r\nPress any key to continue...",
        title.bold(),
        message
    )?;
    stdout.flush()?;

    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(());
            }
        }
    }
}

fn redraw(stdout: &mut io::Stdout, view: &PlannerView) -> Result<(), Box<dyn std::error::Error>> {
    execute!(stdout, cursor::MoveTo(0, 0), Clear(ClearType::All))?;

    let (width, height) = size()?;
    write!(stdout, "{}", render_tasks(view, width as usize, height as usize))?;
    stdout.flush()?;
    Ok(())
}

fn render_tasks(view: &PlannerView, width: usize, height: usize) -> String {
    if width < 40 || height < 12 {
        return "Terminal too small. Please resize the window.".to_string();
    }

    let mut output = String::new();

    // HEADER
    output.push_str(&format!("{}\r\n", "=".repeat(width)));
    output.push_str(&format!(
        "📋 TaskMate | {} ({} shown)\r\n",
        view.filter,
        view.tasks.len()
    ));
    output.push_str(&format!("{}\r\n\r\n", "=".repeat(width)));

    let footer_lines = 5;
    let header_lines = 4;
    let visible = (height.saturating_sub(header_lines + footer_lines) / LINES_PER_TASK).max(1);

    if view.tasks.is_empty() {
        output.push_str("  No tasks. Press 'a' to add one.\r\n");
    }

    let start = view.selected.saturating_sub(visible / 2);
    let end = (start + visible).min(view.tasks.len());

    for (index, task) in view.tasks.iter().enumerate().take(end).skip(start) {
        let checkbox = if task.is_completed() { "☑" } else { "☐" };
        let pointer = if index == view.selected { "→ " } else { "  " };

        let mut line = format!("{}{} {}", pointer, checkbox, task.title());
        if line.chars().count() > width {
            line = line.chars().take(width.saturating_sub(1)).collect();
        }
        output.push_str(&format!("{}\r\n", line));

        let due = task
            .due_date()
            .map(|d| d.to_string())
            .unwrap_or_else(|| "unset".to_string());
        output.push_str(&format!(
            "     Due: {} | Priority: {} | Status: {}\r\n\r\n",
            due,
            priority_label(task.priority()),
            status_label(task.status())
        ));
    }

    output.push_str(&format!("\r\n{}\r\n", "─".repeat(width)));
    output.push_str("💡 Controls:\r\n");
    output.push_str("   ↑/↓: Navigate | a: Add | c: Complete | o: Reopen | d: Delete\r\n");
    output.push_str("   p: By priority | s: By status | /: Search | x: Show all | q: Quit\r\n");

    output
}

fn priority_label(priority: Priority) -> ColoredString {
    match priority {
        Priority::High => priority.as_str().red().bold(),
        Priority::Medium => priority.as_str().yellow(),
        Priority::Low => priority.as_str().green(),
    }
}

fn status_label(status: Status) -> ColoredString {
    match status {
        Status::Pending => status.as_str().cyan(),
        Status::Completed => status.as_str().dimmed(),
    }
}

fn prompt_new_task() -> Result<Option<Task>, Box<dyn std::error::Error>> {
    println!("📝 Add New Task");
    println!("{}", "=".repeat(80));

    let theme = ColorfulTheme::default();

    let title: String = Input::with_theme(&theme)
        .with_prompt("Title")
        .allow_empty(true)
        .interact_text()?;

    if title.trim().is_empty() {
        return Ok(None);
    }

    let description: String = Input::with_theme(&theme)
        .with_prompt("Description (optional)")
        .allow_empty(true)
        .interact_text()?;

    let today = Local::now().date_naive();
    let due_input: String = Input::with_theme(&theme)
        .with_prompt("Due date (YYYY-MM-DD)")
        .with_initial_text(today.to_string())
        .validate_with(|input: &String| -> Result<(), String> {
            parse_due_date(input).map(|_| ())
        })
        .interact_text()?;
    let due_date = parse_due_date(&due_input)?;

    let Some(priority) = select_variant("Priority", &Priority::ALL, 1)? else {
        return Ok(None);
    };

    Ok(Some(Task::new(
        title.trim(),
        description.trim(),
        due_date,
        priority,
    )))
}

fn parse_due_date(input: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(input.trim(), iso_date::FORMAT)
        .map_err(|_| format!("`{}` is not a date like 2025-01-31", input.trim()))
}

fn select_variant<T: Copy + std::fmt::Display>(
    prompt: &str,
    items: &[T],
    default: usize,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(items)
        .default(default)
        .interact_opt()?;

    Ok(choice.map(|index| items[index]))
}

fn prompt_keyword() -> Result<String, Box<dyn std::error::Error>> {
    let keyword: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Search title or description")
        .allow_empty(true)
        .interact_text()?;
    Ok(keyword.trim().to_string())
}

fn confirm_delete(task: &Task) -> Result<bool, Box<dyn std::error::Error>> {
    println!("🗑  Delete Task");
    println!("{}", "=".repeat(80));
    println!("{}", task);

    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Are you sure you want to delete this task?")
        .default(false)
        .interact()?;
    Ok(confirmed)
}
