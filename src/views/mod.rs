//! Server-rendered pages.
//!
//! Templates are plain HTML with `{{name}}` placeholders, embedded at compile
//! time. Every user-supplied value goes through [`escape_html`], which also
//! escapes braces so a value can never be mistaken for a placeholder.
use crate::models::{EditForm, FieldErrors, LoginForm, RegisterForm, Task, User};
use crate::session::GuestTasks;

const BASE: &str = include_str!("../../templates/base.html");
const INDEX: &str = include_str!("../../templates/index.html");
const LOGIN: &str = include_str!("../../templates/login.html");
const REGISTER: &str = include_str!("../../templates/register.html");
const EDIT: &str = include_str!("../../templates/edit.html");
const ERROR: &str = include_str!("../../templates/error.html");

/// What the task list on the index page is showing.
pub enum TaskList<'a> {
    Guest(&'a GuestTasks),
    Owned(&'a [Task]),
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, principal: Option<&User>, flashes: &[String], content: &str) -> String {
    let nav = match principal {
        Some(_) => r#"<a href="/dashboard">Dashboard</a><a href="/logout">Logout</a>"#,
        None => r#"<a href="/">Home</a><a href="/login">Login</a><a href="/register">Register</a>"#,
    };
    let flashes = flashes
        .iter()
        .map(|msg| format!(r#"<p class="flash">{}</p>"#, escape_html(msg)))
        .collect::<Vec<_>>()
        .join("\n");

    BASE.replace("{{title}}", &escape_html(title))
        .replace("{{nav}}", nav)
        .replace("{{flashes}}", &flashes)
        .replace("{{content}}", content)
}

fn field_errors(errors: &FieldErrors, field: &str) -> String {
    errors
        .get(field)
        .map(|messages| {
            messages
                .iter()
                .map(|m| format!(r#"<p class="field-error">{}</p>"#, escape_html(m)))
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default()
}

pub fn render_index(list: TaskList<'_>, principal: Option<&User>, flashes: &[String]) -> String {
    let (heading, action) = match (&list, principal) {
        (TaskList::Owned(_), Some(user)) => (format!("{}'s Tasks", user.name), "/add-task"),
        _ => ("Your Tasks".to_string(), "/"),
    };

    let rows = match list {
        TaskList::Guest(tasks) => tasks
            .iter()
            .map(|task| format!("<li><span>{}</span></li>", escape_html(task)))
            .collect::<Vec<_>>(),
        TaskList::Owned(tasks) => tasks
            .iter()
            .map(|task| {
                format!(
                    r#"<li><span>{}</span><span class="actions"><a href="/edit/{}">Edit</a><a href="/delete/{}">Delete</a></span></li>"#,
                    escape_html(&task.task_name),
                    task.id,
                    task.id
                )
            })
            .collect::<Vec<_>>(),
    };
    let rows = if rows.is_empty() {
        r#"<li class="empty">Nothing to do yet.</li>"#.to_string()
    } else {
        rows.join("\n")
    };

    let content = INDEX
        .replace("{{heading}}", &escape_html(&heading))
        .replace("{{action}}", action)
        .replace("{{tasks}}", &rows);
    page("Tasks", principal, flashes, &content)
}

pub fn render_login(form: &LoginForm, errors: &FieldErrors, flashes: &[String]) -> String {
    let content = LOGIN
        .replace("{{email}}", &escape_html(&form.email))
        .replace("{{email_errors}}", &field_errors(errors, "email"))
        .replace("{{password_errors}}", &field_errors(errors, "password"));
    page("Login", None, flashes, &content)
}

pub fn render_register(form: &RegisterForm, errors: &FieldErrors, flashes: &[String]) -> String {
    let content = REGISTER
        .replace("{{name}}", &escape_html(&form.name))
        .replace("{{name_errors}}", &field_errors(errors, "name"))
        .replace("{{email}}", &escape_html(&form.email))
        .replace("{{email_errors}}", &field_errors(errors, "email"))
        .replace("{{password_errors}}", &field_errors(errors, "password"));
    page("Register", None, flashes, &content)
}

pub fn render_edit(
    task_id: i64,
    form: &EditForm,
    errors: &FieldErrors,
    principal: &User,
    flashes: &[String],
) -> String {
    let content = EDIT
        .replace("{{task_id}}", &task_id.to_string())
        .replace("{{name}}", &escape_html(&form.name))
        .replace("{{name_errors}}", &field_errors(errors, "name"));
    page("Edit Task", Some(principal), flashes, &content)
}

pub fn render_error(heading: &str, message: &str, principal: Option<&User>) -> String {
    let content = ERROR
        .replace("{{heading}}", &escape_html(heading))
        .replace("{{message}}", &escape_html(message));
    page(heading, principal, &[], &content)
}
