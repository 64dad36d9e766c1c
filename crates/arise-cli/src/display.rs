//! Terminal rendering of profiles, content and level-up events

use colored::{ColoredString, Colorize};

use arise::{ActivityItem, Drill, GainOutcome, Profile, Rank, Tip, TipImportance, Track};

fn rank_badge(rank: Rank) -> ColoredString {
    let label = format!("[{}-RANK]", rank);
    match rank {
        Rank::S => label.magenta().bold(),
        Rank::A => label.red().bold(),
        Rank::B => label.yellow().bold(),
        Rank::C => label.green().bold(),
        Rank::D => label.cyan(),
        Rank::E => label.dimmed(),
    }
}

/// Text progress bar, `width` cells wide
fn bar(value: f64, max: f64, width: usize) -> String {
    let ratio = if max > 0.0 { (value / max).clamp(0.0, 1.0) } else { 0.0 };
    let filled = (ratio * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn print_status(profile: &Profile) {
    println!(
        "{} {} {}",
        profile.name.cyan().bold(),
        rank_badge(profile.rank),
        format!("Lv.{}", profile.level).bold()
    );
    println!(
        "  XP  {} {:.0}/{:.0}",
        bar(profile.xp, profile.threshold(), 20).blue(),
        profile.xp,
        profile.threshold()
    );

    let stats = &profile.stats;
    println!("\n{}", "Stats:".bold());
    println!(
        "  STR {:>6.1}   AGI {:>6.1}   VIT {:>6.1}",
        stats.strength, stats.agility, stats.vitality
    );
    println!("  INT {:>6.1}   SEN {:>6.1}", stats.intelligence, stats.sense);
    println!("  Combat power {}", format!("{:.1}", stats.combat_power()).yellow());

    println!("\n{}", "Training:".bold());
    println!(
        "  {} | {} | goal: {}",
        profile.preferred_location.unwrap_or_default(),
        profile.difficulty,
        profile.daily_goal
    );

    if let Some(progress) = profile.active_martial_progress() {
        println!(
            "  {} Lv.{} {} {:.0}/{:.0}",
            profile.martial_style.display_name().red(),
            progress.level,
            bar(progress.xp, progress.threshold(), 12).red(),
            progress.xp,
            progress.threshold()
        );
    }

    let others: Vec<String> = profile
        .martial_progress
        .iter()
        .filter(|(style, p)| **style != profile.martial_style && (p.level > 1 || p.xp > 0.0))
        .map(|(style, p)| format!("{} Lv.{}", style.display_name(), p.level))
        .collect();
    if !others.is_empty() {
        println!("  {}", others.join(", ").dimmed());
    }
}

pub fn print_quests(quests: &[ActivityItem]) {
    if quests.is_empty() {
        println!("No quests available. Try {} later.", "arise quests --refresh".cyan());
        return;
    }

    println!("{}", "Daily Quests:".bold());
    for quest in quests {
        let marker = if quest.completed {
            "✓".green()
        } else {
            "○".normal()
        };
        println!(
            "  {} {} {} {}",
            marker,
            quest.title.cyan().bold(),
            format!("[{}]", quest.category).dimmed(),
            format!("+{:.0} XP", quest.xp_reward).yellow()
        );
        println!("      {} x {}  {}", quest.sets, quest.reps, quest.id.dimmed());
        println!("      {}", quest.description);
        if !quest.instructions.is_empty() {
            println!("      {}", quest.instructions.dimmed());
        }
    }
}

pub fn print_tips(tips: &[Tip]) {
    if tips.is_empty() {
        println!("No guidance available right now.");
        return;
    }

    println!("{}", "Guidance:".bold());
    for tip in tips {
        let badge = match tip.importance {
            TipImportance::Critical => "!!".red().bold(),
            TipImportance::High => "! ".yellow(),
            TipImportance::Normal => "  ".normal(),
        };
        println!("  {} {} {}", badge, format!("[{}]", tip.category).cyan(), tip.content);
    }
}

pub fn print_drills(drills: &[Drill]) {
    if drills.is_empty() {
        println!("No drills available. Pick a style with {}.", "arise style".cyan());
        return;
    }

    println!("{}", "Dojo Drills:".bold());
    for drill in drills {
        let kind = if drill.is_physical { "physical" } else { "technique" };
        println!(
            "  {} {} {}",
            drill.title.red().bold(),
            drill.reps.yellow(),
            format!("({})", kind).dimmed()
        );
        println!("      {}", drill.description);
    }
}

/// Announce the result of an experience gain
pub fn print_outcome(outcome: &GainOutcome) {
    println!(
        "{} {}",
        format!("+{:.0} XP", outcome.amount).yellow().bold(),
        format!("({})", outcome.category).dimmed()
    );
    for event in &outcome.level_ups {
        match event.track {
            Track::Hunter => println!(
                "  {} {}",
                "LEVEL UP!".green().bold(),
                format!("Lv.{}", event.new_level).bold()
            ),
            Track::Martial(style) => println!(
                "  {} {} {}",
                "SKILL UP!".red().bold(),
                style.display_name(),
                format!("Lv.{}", event.new_level).bold()
            ),
        }
    }
    if outcome.rank_changed() {
        println!(
            "  {} {} → {}",
            "RANK UP!".magenta().bold(),
            rank_badge(outcome.previous_rank),
            rank_badge(outcome.rank)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_bounds() {
        assert_eq!(bar(0.0, 100.0, 4), "░░░░");
        assert_eq!(bar(50.0, 100.0, 4), "██░░");
        assert_eq!(bar(250.0, 100.0, 4), "████");
        assert_eq!(bar(5.0, 0.0, 2), "░░");
    }
}
