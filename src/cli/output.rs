//! Colored output helpers for CLI
//!
//! Provides consistent, colored terminal output for the vade CLI.

use owo_colors::OwoColorize;
use std::io::{self, Write};

/// Output style configuration
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Create a new output helper with colors enabled
    pub fn new() -> Self {
        Self { colored: true }
    }

    /// Create a new output helper with colors disabled
    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Print the interactive session banner
    pub fn banner(&self, title: &str) {
        self.rule();
        if self.colored {
            println!(
                "  {} {}",
                title.bright_white().bold(),
                format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
            );
        } else {
            println!("  {} v{}", title, env!("CARGO_PKG_VERSION"));
        }
        self.rule();
    }

    /// Print a horizontal rule
    pub fn rule(&self) {
        if self.colored {
            println!("  {}", "─".repeat(70).dimmed());
        } else {
            println!("  {}", "-".repeat(70));
        }
    }

    /// Print a success message with a checkmark
    pub fn success(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "✓".green().bold(), message.green());
        } else {
            println!("  [OK] {}", message);
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "•".blue(), message);
        } else {
            println!("  [INFO] {}", message);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "⚠".yellow().bold(), message.yellow());
        } else {
            println!("  [WARN] {}", message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "✗".red().bold(), message.red());
        } else {
            eprintln!("  [ERROR] {}", message);
        }
    }

    /// Print a header for a section
    pub fn header(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.bright_white().bold().underline());
        } else {
            println!("\n  === {} ===", title);
        }
    }

    /// Print a subheader
    pub fn subheader(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.cyan().bold());
        } else {
            println!("\n  --- {} ---", title);
        }
    }

    /// Print a key-value pair
    pub fn kv(&self, key: &str, value: &str) {
        if self.colored {
            println!("    {}: {}", key.dimmed(), value.bright_white());
        } else {
            println!("    {}: {}", key, value);
        }
    }

    /// Print a list item
    pub fn list_item(&self, item: &str) {
        if self.colored {
            println!("    {} {}", "•".blue(), item);
        } else {
            println!("    - {}", item);
        }
    }

    /// Print a hint/tip message
    pub fn hint(&self, message: &str) {
        if self.colored {
            println!("\n  {} {}", "💡".dimmed(), message.dimmed().italic());
        } else {
            println!("\n  [TIP] {}", message);
        }
    }

    /// Print a command suggestion
    pub fn command(&self, cmd: &str) {
        if self.colored {
            println!("     {}", format!("$ {}", cmd).bright_cyan());
        } else {
            println!("     $ {}", cmd);
        }
    }

    /// Print a plain text block, such as a generated answer or a config dump
    pub fn body(&self, text: &str) {
        println!("{}", text);
    }

    /// Print one ranked retrieval hit
    pub fn search_hit(&self, rank: usize, label: &str, similarity: f32, preview: &str, url: &str) {
        if self.colored {
            println!(
                "  {} {} {}",
                format!("Rank {}", rank).bright_cyan().bold(),
                "-".dimmed(),
                label.bright_white().bold()
            );
            println!("    {} {:.3}", "Similarity:".dimmed(), similarity);
            println!("    {}", preview);
            println!("    {} {}", "Source:".dimmed(), url.underline());
        } else {
            println!("  Rank {} - {}", rank, label);
            println!("    Similarity: {:.3}", similarity);
            println!("    {}", preview);
            println!("    Source: {}", url);
        }
        println!();
    }

    /// Prompt for a line of input (returns None on end of input)
    pub fn prompt(&self, label: &str) -> Option<String> {
        if self.colored {
            print!("{} ", label.bright_white().bold());
        } else {
            print!("{} ", label);
        }

        io::stdout().flush().ok();

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => None,
            Ok(_) => Some(input.trim().to_string()),
            Err(_) => None,
        }
    }

    /// Print newline
    pub fn newline(&self) {
        println!();
    }
}
