//! Fixed schedule setup commands.

use clap::Subcommand;
use dayline_core::timeline::FreeTime;
use dayline_core::{Profile, ProfileStore, ScheduleField, SessionEvent, TimelineSession};

use super::{CommandResult, Context};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Create the profile from the configured defaults
    Init {
        /// Overwrite an existing profile, dropping its placements
        #[arg(long)]
        force: bool,
    },
    /// Show the fixed schedule and free time
    Show {
        /// Output the stored document as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change one schedule field (e.g. "sleepStart 23:00", "commute_minutes 45")
    Set {
        field: ScheduleField,
        value: String,
    },
}

pub fn run(ctx: &Context, action: ProfileAction) -> CommandResult {
    match action {
        ProfileAction::Init { force } => init(ctx, force),
        ProfileAction::Show { json } => show(ctx, json),
        ProfileAction::Set { field, value } => set(ctx, field, &value),
    }
}

fn init(ctx: &Context, force: bool) -> CommandResult {
    let store = ctx.store()?;
    if !force && store.load(ctx.user_id())?.is_some() {
        return Err(format!(
            "profile for '{}' already exists; use --force to start over",
            ctx.user_id()
        )
        .into());
    }

    let profile = ctx.config.defaults.to_profile();
    let session = TimelineSession::create(store, ctx.user_id(), profile, ctx.catalog()?)?;
    println!("Profile created for {}", session.user_id());
    print_profile(session.profile());
    Ok(())
}

fn show(ctx: &Context, json: bool) -> CommandResult {
    let session = ctx.session()?;
    if json {
        println!("{}", serde_json::to_string_pretty(session.profile())?);
    } else {
        print_profile(session.profile());
    }
    Ok(())
}

fn set(ctx: &Context, field: ScheduleField, value: &str) -> CommandResult {
    let mut session = ctx.session()?;
    session.apply(SessionEvent::EditSchedule {
        field,
        value: value.to_string(),
    })?;
    session.save()?;
    println!("{} = {}", field.as_str(), value);

    // Accepted edits can still leave work ending before it starts.
    if let Err(e) = session.profile().validate() {
        eprintln!("warning: {e}");
    }
    Ok(())
}

/// Print the schedule fields, then free time when the profile is consistent.
fn print_profile(profile: &Profile) {
    println!("  Sleep:           {} - {}", profile.sleep_start, profile.sleep_end);
    println!("  Work:            {} - {}", profile.work_start, profile.work_end);
    println!("  Commute:         {} min", profile.commute_minutes);
    println!("  Morning routine: {} min", profile.morning_routine_minutes);
    println!("  Misc:            {} min", profile.misc_minutes);
    println!("  Placed habits:   {}", profile.scheduled_habits.len());

    let free = match FreeTime::of(profile) {
        Ok(free) => free,
        Err(e) => {
            eprintln!("warning: {e}");
            return;
        }
    };
    println!("  Free time:       {free}");
    if free.is_overbooked() {
        println!(
            "  (fixed obligations exceed the day by {} min)",
            free.occupied_minutes() - dayline_core::MINUTES_PER_DAY
        );
    }
}
