//! Text output formatting with progress bars and colors.

use chrono::{DateTime, Duration, Local, Utc};
use kirotoken_core::{ImportResult, UsageAmount, UsageSnapshot};

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

// Progress bar characters
const BAR_FULL: char = '█';
const BAR_EMPTY: char = '░';

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
    bar_width: usize,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self {
            use_colors,
            bar_width: 10,
        }
    }

    /// Formats a finished import.
    pub fn format_result(&self, result: &ImportResult) -> String {
        let token = &result.kiro_token;
        let mut lines = Vec::new();

        lines.push(format!(
            "{} ({})",
            self.bold("Kiro account"),
            token.auth_method
        ));

        if let Some(email) = &result.usage.email {
            lines.push(format!("  Email:        {email}"));
        }
        lines.push(format!("  Provider:     {}", token.provider));
        if let Some(arn) = &token.profile_arn {
            lines.push(format!("  Profile:      {}", self.dim(arn)));
        }
        lines.push(format!(
            "  Expires:      {}",
            self.format_expiry(token.expires_at)
        ));
        lines.push(format!("  Usage:        {}", self.format_usage(&result.usage)));

        if let Some(artifact) = &result.client_id_hash_file {
            lines.push(format!("  Client file:  {}", self.cyan(&artifact.filename)));
        }

        lines.join("\n")
    }

    /// Formats the usage line.
    fn format_usage(&self, usage: &UsageSnapshot) -> String {
        if usage.is_placeholder() {
            let note = usage.note.as_deref().unwrap_or("unavailable");
            return self.yellow(&format!("unavailable ({note})"));
        }

        let remaining_percent = usage.used_percent().map_or(100.0, |used| 100.0 - used);
        format!(
            "{} {} / {} used, {} remaining",
            self.progress_bar(remaining_percent),
            format_amount(usage.used),
            format_amount(usage.limit),
            format_amount(usage.remaining)
        )
    }

    /// Creates a progress bar string.
    ///
    /// The bar shows the remaining share, so fuller is better.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn progress_bar(&self, percent_remaining: f64) -> String {
        let percent_remaining = percent_remaining.clamp(0.0, 100.0);
        let filled = ((percent_remaining / 100.0) * self.bar_width as f64).round() as usize;
        let empty = self.bar_width.saturating_sub(filled);

        let bar = format!(
            "{}{}",
            BAR_FULL.to_string().repeat(filled),
            BAR_EMPTY.to_string().repeat(empty)
        );

        self.color_for_percent(percent_remaining, &bar)
    }

    /// Formats expiry as a countdown plus local time.
    fn format_expiry(&self, expires_at: DateTime<Utc>) -> String {
        let local = expires_at.with_timezone(&Local).format("%Y-%m-%d %H:%M");
        let diff = expires_at - Utc::now();

        if diff <= Duration::zero() {
            return self.red(&format!("{local} (expired)"));
        }

        let countdown = if diff < Duration::hours(1) {
            let mins = diff.num_minutes();
            format!("in {} minute{}", mins, if mins == 1 { "" } else { "s" })
        } else if diff < Duration::hours(48) {
            format!("in {}h {}m", diff.num_hours(), diff.num_minutes() % 60)
        } else {
            format!("in {} days", diff.num_days())
        };
        format!("{local} {}", self.dim(&format!("({countdown})")))
    }

    /// Formats an error message.
    pub fn format_error(&self, error: &str) -> String {
        format!("{} {}", self.red("Error:"), error)
    }

    fn color_for_percent(&self, percent: f64, text: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }

        if percent < 20.0 {
            self.red(text)
        } else if percent < 50.0 {
            self.yellow(text)
        } else {
            self.green(text)
        }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }
}

/// Whole numbers without decimals, fractions with up to two.
fn format_amount(amount: UsageAmount) -> String {
    match amount.value() {
        Some(n) if n.fract() == 0.0 => format!("{n:.0}"),
        Some(n) => format!("{n:.2}"),
        None => amount.to_string(),
    }
}
