//! Console output utilities.

use console::style;

use crate::model::Profile;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("OK").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════╗
║     Instagram Profile Scanner                 ║
╚═══════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print configuration summary.
pub fn print_config_summary(username: &str, scan_mode: &str, output_dir: &str) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Profile:   {}", username);
    println!("  Mode:      {}", scan_mode);
    println!("  Directory: {}", output_dir);
    println!();
}

/// Print the resolved profile's key attributes.
pub fn print_profile_overview(profile: &Profile) {
    let yes_no = |flag: bool| if flag { "yes" } else { "no" };

    println!();
    println!(
        "{}",
        style(format!("Profile @{}", profile.username)).bold()
    );
    println!("  Name:      {}", profile.full_name);
    if !profile.biography.is_empty() {
        let bio = profile.biography.replace('\n', " / ");
        println!("  Bio:       {}", truncate(&bio, 100));
    }
    if let Some(url) = &profile.external_url {
        println!("  Link:      {}", url);
    }
    println!("  Followers: {}", profile.followers);
    println!("  Following: {}", profile.followees);
    println!("  Posts:     {}", profile.media_count);
    println!("  Verified:  {}", yes_no(profile.is_verified));
    println!("  Private:   {}", yes_no(profile.is_private));
    if profile.is_business {
        println!("  Business:  yes");
    }
    println!();
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let head: String = text.chars().take(max_chars).collect();
    format!("{}...", head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 100), "short");
        assert_eq!(truncate("אבגדה", 3), "אבג...");
    }
}
