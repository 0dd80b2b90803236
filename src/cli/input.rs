//! Line-oriented input helpers for the step screens
//!
//! Every prompt reads one line from the supplied reader, so screens can
//! be exercised in tests with an in-memory cursor. An empty line keeps
//! the current value; end of input is treated as "keep" (or "quit" for
//! navigation) so a closed stdin cannot wedge the wizard in a loop.

use std::fmt::Display;
use std::io::{self, BufRead};

use super::presenter::Presenter;

/// What the user asked the flow to do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIntent {
    /// Move to the next step
    Next,
    /// Return to the previous step
    Back,
    /// Revisit a completed step by number
    Jump(u8),
    /// Leave the wizard
    Quit,
}

/// Read one line, trimmed. Returns None at end of input.
pub fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    let n = input.read_line(&mut line)?;
    if n == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Prompt for a free-text value. Returns the entered text, or None to
/// keep the current value.
pub fn prompt_text<R: BufRead>(
    presenter: &Presenter,
    input: &mut R,
    label: &str,
    current: &str,
) -> io::Result<Option<String>> {
    if current.is_empty() {
        presenter.output_inline(&format!("{}: ", label));
    } else {
        presenter.output_inline(&format!("{} [{}]: ", label, current));
    }

    match read_line(input)? {
        None => Ok(None),
        Some(line) if line.is_empty() => Ok(None),
        Some(line) => Ok(Some(line)),
    }
}

/// Prompt for a yes/no value. Returns the chosen value, or None to keep
/// the current one.
pub fn prompt_yes_no<R: BufRead>(
    presenter: &Presenter,
    input: &mut R,
    label: &str,
    current: bool,
) -> io::Result<Option<bool>> {
    loop {
        presenter.output_inline(&format!(
            "{} (y/n) [{}]: ",
            label,
            if current { "y" } else { "n" }
        ));
        match read_line(input)? {
            None => return Ok(None),
            Some(line) => match line.to_lowercase().as_str() {
                "" => return Ok(None),
                "y" | "yes" => return Ok(Some(true)),
                "n" | "no" => return Ok(Some(false)),
                _ => presenter.warn("Please answer y or n."),
            },
        }
    }
}

/// Prompt for one choice from a numbered list. Returns the chosen value,
/// or None to keep the current one.
pub fn prompt_choice<R, T>(
    presenter: &Presenter,
    input: &mut R,
    label: &str,
    options: &[T],
    current: Option<T>,
) -> io::Result<Option<T>>
where
    R: BufRead,
    T: Copy + Display,
{
    presenter.output(label);
    for (i, option) in options.iter().enumerate() {
        presenter.output(&format!("  {}. {}", i + 1, option));
    }

    loop {
        match current {
            Some(value) => presenter.output_inline(&format!("Choose [{}]: ", value)),
            None => presenter.output_inline("Choose: "),
        }
        match read_line(input)? {
            None => return Ok(None),
            Some(line) if line.is_empty() => return Ok(None),
            Some(line) => match line.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => return Ok(Some(options[n - 1])),
                _ => presenter.warn(&format!("Enter a number from 1 to {}.", options.len())),
            },
        }
    }
}

/// Prompt for any number of choices from a numbered list, comma-separated.
/// Returns the chosen values (possibly empty), or None to keep the
/// current selection.
pub fn prompt_multi_choice<R, T>(
    presenter: &Presenter,
    input: &mut R,
    label: &str,
    options: &[T],
    current: &[T],
) -> io::Result<Option<Vec<T>>>
where
    R: BufRead,
    T: Copy + Display,
{
    presenter.output(label);
    for (i, option) in options.iter().enumerate() {
        presenter.output(&format!("  {}. {}", i + 1, option));
    }
    let shown = current
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    loop {
        presenter.output_inline(&format!(
            "Choose (comma-separated, 'none' for none) [{}]: ",
            if shown.is_empty() { "none" } else { shown.as_str() }
        ));
        match read_line(input)? {
            None => return Ok(None),
            Some(line) if line.is_empty() => return Ok(None),
            Some(line) if line.eq_ignore_ascii_case("none") => return Ok(Some(Vec::new())),
            Some(line) => {
                let picks: Result<Vec<usize>, _> =
                    line.split(',').map(|part| part.trim().parse()).collect();
                match picks {
                    Ok(numbers)
                        if numbers.iter().all(|n| (1..=options.len()).contains(n)) =>
                    {
                        return Ok(Some(numbers.iter().map(|&n| options[n - 1]).collect()));
                    }
                    _ => presenter.warn(&format!(
                        "Enter numbers from 1 to {}, separated by commas.",
                        options.len()
                    )),
                }
            }
        }
    }
}

/// Prompt for a navigation command. End of input quits.
pub fn prompt_nav<R: BufRead>(
    presenter: &Presenter,
    input: &mut R,
    allow_back: bool,
) -> io::Result<NavIntent> {
    let commands = if allow_back {
        "[n] next  [b] back  [1-8] revisit a completed step  [q] quit"
    } else {
        "[n] next  [q] quit"
    };

    loop {
        presenter.output(commands);
        presenter.output_inline("> ");
        match read_line(input)? {
            None => return Ok(NavIntent::Quit),
            Some(line) => match line.to_lowercase().as_str() {
                "n" | "next" | "" => return Ok(NavIntent::Next),
                "b" | "back" if allow_back => return Ok(NavIntent::Back),
                "q" | "quit" => return Ok(NavIntent::Quit),
                other => match other.parse::<u8>() {
                    Ok(step) => return Ok(NavIntent::Jump(step)),
                    Err(_) => presenter.warn("Unknown command."),
                },
            },
        }
    }
}
