//! Daily timeline views.

use clap::Subcommand;
use dayline_core::timeline::{clock_label, drop_slots, OpenWindowDetector};
use dayline_core::BlockKind;

use super::{reference_day, CommandResult, Context};

#[derive(Subcommand)]
pub enum TimelineAction {
    /// Show the assembled timeline
    Show {
        /// Reference day (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        day: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Order blocks by start time instead of fixed-then-placed
        #[arg(long)]
        sorted: bool,
    },
    /// Show the free-time breakdown
    Free {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List stretches of the day no block covers
    Windows {
        /// Only report windows of at least this many minutes
        #[arg(long, default_value = "0")]
        min: u32,
    },
    /// List the drop-slot grid
    Slots,
}

pub fn run(ctx: &Context, action: TimelineAction) -> CommandResult {
    match action {
        TimelineAction::Show { day, json, sorted } => show(ctx, day.as_deref(), json, sorted),
        TimelineAction::Free { json } => free(ctx, json),
        TimelineAction::Windows { min } => windows(ctx, min),
        TimelineAction::Slots => {
            for slot in drop_slots(ctx.config.placement.slot_minutes) {
                println!("{slot}");
            }
            Ok(())
        }
    }
}

fn show(ctx: &Context, day: Option<&str>, json: bool, sorted: bool) -> CommandResult {
    let day = reference_day(day)?;
    let session = ctx.session()?;
    let timeline = session.timeline(day)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&timeline)?);
        return Ok(());
    }

    println!("Timeline for {} ({})", timeline.day, session.user_id());
    let blocks = if sorted {
        timeline.chronological()
    } else {
        timeline.blocks.iter().collect()
    };
    for block in blocks {
        let marker = match block.kind {
            BlockKind::Habit => "*",
            _ => " ",
        };
        print!("  {marker} {:<11}  {}", block.clock_range(), block.label);
        if let Some(id) = &block.placement_id {
            print!("  [{id}]");
        }
        println!();
    }

    for (a, b) in timeline.overlaps() {
        let (a, b) = (&timeline.blocks[a], &timeline.blocks[b]);
        if a.kind == BlockKind::Habit || b.kind == BlockKind::Habit {
            println!("  note: '{}' overlaps '{}'", a.label, b.label);
        }
    }
    for placement in session.orphaned() {
        println!(
            "  note: '{}' is no longer in the habit catalog",
            placement.habit_name
        );
    }
    println!("Free time: {}", timeline.free_time);
    Ok(())
}

fn free(ctx: &Context, json: bool) -> CommandResult {
    let session = ctx.session()?;
    let free = dayline_core::FreeTime::of(session.profile())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&free)?);
        return Ok(());
    }

    println!("Sleep:           {} min", free.sleep_minutes);
    println!("Work:            {} min", free.work_minutes);
    println!("Commute:         {} min", free.commute_minutes);
    println!("Morning routine: {} min", free.morning_routine_minutes);
    println!("Misc:            {} min", free.misc_minutes);
    println!("Free:            {free} ({} min)", free.free_minutes);
    Ok(())
}

fn windows(ctx: &Context, min: u32) -> CommandResult {
    let session = ctx.session()?;
    let blocks = dayline_core::generate_blocks(session.profile())?;
    let windows = OpenWindowDetector::new().with_min_minutes(min).find(&blocks);

    if windows.is_empty() {
        println!("No open windows.");
        return Ok(());
    }
    for window in windows {
        println!(
            "{}-{}  {} min",
            clock_label(window.start),
            clock_label(window.end),
            window.duration_minutes()
        );
    }
    Ok(())
}
