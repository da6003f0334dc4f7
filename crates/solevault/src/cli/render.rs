use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;
use solevaultapp::aggregate::VaultStats;
use solevaultapp::commands::{CmdMessage, MessageLevel};
use solevaultapp::error::{Result, VaultError};
use solevaultapp::identify::Identification;
use solevaultapp::model::Sneaker;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const ID_WIDTH: usize = 10;
const SIZE_WIDTH: usize = 6;
const PRICE_WIDTH: usize = 10;
const TIME_WIDTH: usize = 14;
const BAR_WIDTH: usize = 30;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

/// Same as [`print_messages`] but on stderr, for when stdout carries data.
pub(super) fn eprint_messages(messages: &[CmdMessage]) {
    for message in messages {
        eprintln!("{}", message.content);
    }
}

pub(super) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value).map_err(VaultError::Serialization)?);
    Ok(())
}

/// One line per pair: short id, name, size, price, age.
pub(super) fn print_list<F>(sneakers: &[Sneaker], short_id: F)
where
    F: Fn(&str) -> String,
{
    for sneaker in sneakers {
        println!("{}", list_line(sneaker, &short_id(&sneaker.id), Utc::now()));
    }
}

pub(super) fn list_line(sneaker: &Sneaker, short_id: &str, now: DateTime<Utc>) -> String {
    let id = format!("{:<width$}", short_id, width = ID_WIDTH);
    let size = format!("{:>width$}", format_size(sneaker.size), width = SIZE_WIDTH);
    let price = format!("{:>width$}", format_price(sneaker.price), width = PRICE_WIDTH);
    let age = format_time_ago(sneaker.added_date, now);

    let fixed = ID_WIDTH + SIZE_WIDTH + PRICE_WIDTH + TIME_WIDTH + 3;
    let available = LINE_WIDTH.saturating_sub(fixed);

    let name = sneaker.display_name();
    let name = if sneaker.colorway.trim().is_empty() {
        name
    } else {
        format!("{} · {}", name, sneaker.colorway.trim())
    };
    let name = truncate_to_width(&name, available);
    let padding = available.saturating_sub(name.width());

    format!(
        "{} {}{} {} {}{}",
        id.yellow(),
        name.bold(),
        " ".repeat(padding),
        size,
        price.green(),
        age.dimmed()
    )
}

pub(super) fn print_full(sneakers: &[Sneaker]) {
    for (i, sneaker) in sneakers.iter().enumerate() {
        if i > 0 {
            println!("\n--------------------------------\n");
        }
        println!("{}", sneaker.display_name().bold());
        println!("{:<10} {}", "Id".dimmed(), sneaker.id);
        println!("{:<10} {}", "Colorway".dimmed(), or_dash(&sneaker.colorway));
        println!("{:<10} {}", "Size".dimmed(), format_size(sneaker.size));
        println!("{:<10} {}", "Price".dimmed(), format_price(sneaker.price));
        println!("{:<10} {}", "Condition".dimmed(), sneaker.condition);
        println!(
            "{:<10} {}",
            "Added".dimmed(),
            sneaker.added_date.format("%Y-%m-%d %H:%M UTC")
        );
        println!(
            "{:<10} {}",
            "Image".dimmed(),
            if sneaker.image.is_some() { "yes" } else { "-" }
        );
    }
}

pub(super) fn print_stats(stats: &VaultStats) {
    println!("{:<14} {}", "Total pairs".dimmed(), stats.total_pairs.to_string().bold());
    println!(
        "{:<14} {}",
        "Total value".dimmed(),
        format_price(Some(stats.total_value)).green().bold()
    );
    if stats.priced_pairs < stats.total_pairs {
        println!(
            "{}",
            format!(
                "{} pair(s) without a price are not counted",
                stats.total_pairs - stats.priced_pairs
            )
            .dimmed()
        );
    }
    if stats.brand_distribution.is_empty() {
        return;
    }

    println!("\n{}", "Brands".bold());
    let max = stats
        .brand_distribution
        .iter()
        .map(|b| b.count)
        .max()
        .unwrap_or(1);
    let name_width = stats
        .brand_distribution
        .iter()
        .map(|b| b.name.width())
        .max()
        .unwrap_or(0);
    for brand in &stats.brand_distribution {
        println!(
            "{}{} {} {}",
            brand.name,
            " ".repeat(name_width.saturating_sub(brand.name.width())),
            bar(brand.count, max).cyan(),
            brand.count
        );
    }
}

pub(super) fn print_identification(found: &Identification) {
    println!("{:<10} {}", "Brand".dimmed(), found.brand.bold());
    println!("{:<10} {}", "Model".dimmed(), found.model.bold());
    println!("{:<10} {}", "Colorway".dimmed(), or_dash(&found.colorway));
    println!(
        "{:<10} {}",
        "Est. price".dimmed(),
        format_price(found.estimated_price)
    );
    if let Some(description) = &found.description {
        println!("\n{}", description.italic());
    }
}

/// `$120`, `$120.50`, or `-` when unknown.
pub(super) fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) if p.fract() == 0.0 => format!("${:.0}", p),
        Some(p) => format!("${:.2}", p),
        None => "-".to_string(),
    }
}

pub(super) fn format_size(size: f64) -> String {
    if size.fract() == 0.0 {
        format!("{:.0}", size)
    } else {
        size.to_string()
    }
}

fn or_dash(s: &str) -> &str {
    if s.trim().is_empty() {
        "-"
    } else {
        s
    }
}

fn bar(count: usize, max: usize) -> String {
    let len = (count * BAR_WIDTH).div_ceil(max.max(1));
    "█".repeat(len.max(1))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
