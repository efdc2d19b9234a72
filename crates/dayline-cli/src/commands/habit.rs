//! Habit catalog and placement commands.

use clap::Subcommand;
use dayline_core::{engine, EventOutcome, PlacementId, ProfileStore, SessionEvent};

use super::{CommandResult, Context};

#[derive(Subcommand)]
pub enum HabitAction {
    /// List the habit catalog with placement status
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List catalog habits not placed yet
    Unplaced,
    /// Place a habit on the timeline
    Place {
        /// Habit ID from the catalog
        habit_id: String,
        /// Start time (HH:MM)
        start: String,
    },
    /// Remove a placement by ID
    Remove {
        placement_id: String,
    },
    /// Remove a placement by its position in the list
    RemoveAt {
        index: usize,
    },
}

pub fn run(ctx: &Context, action: HabitAction) -> CommandResult {
    match action {
        HabitAction::List { json } => list(ctx, json),
        HabitAction::Unplaced => unplaced(ctx),
        HabitAction::Place { habit_id, start } => place(ctx, habit_id, start),
        HabitAction::Remove { placement_id } => remove(ctx, placement_id),
        HabitAction::RemoveAt { index } => remove_at(ctx, index),
    }
}

fn list(ctx: &Context, json: bool) -> CommandResult {
    let catalog = ctx.catalog()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }
    if catalog.is_empty() {
        println!("No habits in catalog.");
        return Ok(());
    }

    let placements = ctx
        .store()?
        .load(ctx.user_id())?
        .map(|p| p.scheduled_habits)
        .unwrap_or_default();
    let default_minutes = ctx.config.placement.default_minutes;

    for habit in catalog.habits() {
        let placed = placements.iter().filter(|p| p.habit_id == habit.id).count();
        let status = if placed > 0 {
            format!("placed x{placed}")
        } else {
            "unplaced".to_string()
        };
        println!(
            "{:<12} {:<24} {:>4} min  {:<16} {}",
            habit.id,
            habit.text,
            habit.required_minutes_or(default_minutes),
            habit.category_or_default(),
            status
        );
    }
    Ok(())
}

fn unplaced(ctx: &Context) -> CommandResult {
    let session = ctx.session()?;
    let unplaced = session.unplaced();
    if unplaced.is_empty() {
        println!("Every habit is placed.");
    }
    for habit in unplaced {
        println!("{}  {}", habit.id, habit.text);
    }
    Ok(())
}

fn place(ctx: &Context, habit_id: String, start: String) -> CommandResult {
    let mut session = ctx.session()?;
    let EventOutcome::Placed(placement) =
        session.apply(SessionEvent::Place { habit_id, start })?
    else {
        return Err("placement was not recorded".into());
    };
    session.save()?;

    println!(
        "Placed {} at {} for {} min",
        placement.habit_name, placement.start_time, placement.duration
    );
    println!("Placement ID: {}", placement.placement_id);
    Ok(())
}

fn remove(ctx: &Context, placement_id: String) -> CommandResult {
    let mut session = ctx.session()?;
    let EventOutcome::Removed(placement) = session.apply(SessionEvent::Remove {
        placement_id: PlacementId::from(placement_id),
    })?
    else {
        return Err("placement was not removed".into());
    };
    session.save()?;
    println!(
        "Removed {} at {}",
        placement.habit_name, placement.start_time
    );
    Ok(())
}

fn remove_at(ctx: &Context, index: usize) -> CommandResult {
    let mut store = ctx.store()?;
    let mut profile = store
        .load(ctx.user_id())?
        .ok_or_else(|| format!("no profile for user '{}'", ctx.user_id()))?;
    profile.assign_missing_ids();
    let removed = profile.scheduled_habits.get(index).map(|p| p.habit_name.clone());

    let profile = engine::remove(profile, index)?;
    store.save(ctx.user_id(), &profile)?;
    if let Some(name) = removed {
        println!("Removed {name}");
    }
    Ok(())
}
