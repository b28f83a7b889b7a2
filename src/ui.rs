use colored::*;
use serde::Serialize;

use timetrack::models::{
    employee::Employee, project::Project, screenshot::ScreenshotRecord, task::Task,
    time_log::TimeLog,
};

/// Get the terminal width, defaulting to 80 if unavailable
fn get_terminal_width() -> usize {
    term_size::dimensions().map(|(w, _)| w).unwrap_or(80)
}

fn render_separator() {
    println!("{}", "─".repeat(get_terminal_width().min(60)).dimmed());
}

/// Render a view header: `TITLE (n items)`
pub fn render_view_header(title: &str, count: usize, noun: &str) {
    println!(
        "{} ({} {}{})\n",
        title.to_uppercase().cyan(),
        count,
        noun,
        if count == 1 { "" } else { "s" }
    );
}

pub fn render_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn render_employees(employees: &[Employee]) {
    if employees.is_empty() {
        println!("No employees");
        return;
    }
    render_view_header("Employees", employees.len(), "employee");
    for employee in employees {
        let status = if employee.active {
            "active".green()
        } else {
            "pending".yellow()
        };
        println!("  {} {} <{}>", "•".green(), employee.name.bold(), employee.email);
        println!("    {} {}", employee.id.dimmed(), status);
    }
}

pub fn render_projects(projects: &[Project]) {
    if projects.is_empty() {
        println!("No projects");
        return;
    }
    render_view_header("Projects", projects.len(), "project");
    for project in projects {
        println!("  {} {}", "•".green(), project.name.bold());
        println!(
            "    {} {} {}",
            project.id.dimmed(),
            project.employee_ids.len(),
            if project.employee_ids.len() == 1 {
                "employee"
            } else {
                "employees"
            }
        );
    }
}

pub fn render_tasks(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks");
        return;
    }
    render_view_header("Tasks", tasks.len(), "task");
    for task in tasks {
        println!("  {} {}", "○".normal(), task.name.bold());
        println!("    {} project {}", task.id.dimmed(), task.project_id.blue());
    }
}

/// Time logs have no fixed shape, so each one is shown as compact JSON.
pub fn render_time_logs(time_logs: &[TimeLog]) -> Result<(), serde_json::Error> {
    if time_logs.is_empty() {
        println!("No time logs");
        return Ok(());
    }
    render_view_header("Time logs", time_logs.len(), "log");
    for time_log in time_logs {
        println!("  {} {}", "•".green(), serde_json::to_string(time_log)?);
    }
    Ok(())
}

pub fn render_screenshots(screenshots: &[ScreenshotRecord]) {
    if screenshots.is_empty() {
        println!("No screenshots");
        return;
    }
    render_view_header("Screenshots", screenshots.len(), "screenshot");
    for screenshot in screenshots {
        println!(
            "  {} {} / {} @ {}",
            "•".green(),
            screenshot.project_name.blue(),
            screenshot.employee_name.bold(),
            screenshot.timestamp
        );
        println!(
            "    {} ({})",
            screenshot.filename.dimmed(),
            screenshot.permission
        );
    }
    render_separator();
}
