//! Command handlers
//!
//! Each handler dispatches through the store and prints from the resulting
//! state, never from its own bookkeeping.

use anyhow::{bail, Context, Result};
use chrono::DateTime;
use serde::Serialize;
use serde_json::{json, Value};
use vita_store::actions::{
    Action, AuthAction, ConsumptionPayload, HemoglobinPayload, LoginPayload, NotificationAction,
    NotificationIdPayload, PagePayload, ReportAction, ReportIdPayload, UiAction, UserAction,
};
use vita_store::domain_models::{NotificationDraft, ReportDraft, ReportFiltersPatch};
use vita_store::state::StateTree;
use vita_store::Store;

use crate::{Commands, ReportCommands};

pub fn run(command: Commands, store: &mut Store, json: bool) -> Result<()> {
    match command {
        Commands::Status => status(store, json),
        Commands::Consume => {
            store.dispatch(UserAction::IncrementConsumption);
            print_consumption(store.state(), json)
        }
        Commands::Target { count } => {
            if count == 0 {
                bail!("Target must be at least 1");
            }
            store.dispatch(UserAction::SetConsumption(ConsumptionPayload {
                target: Some(count),
                ..ConsumptionPayload::default()
            }));
            print_consumption(store.state(), json)
        }
        Commands::Hb { value } => {
            if !value.is_finite() || value <= 0.0 {
                bail!("Hemoglobin must be a positive number, got {}", value);
            }
            store.dispatch(UserAction::UpdateHemoglobin(HemoglobinPayload::new(value)));
            let hemoglobin = &store.state().user.hemoglobin;
            if json {
                return print_json(hemoglobin);
            }
            println!(
                "Hemoglobin {:.1} g/dL ({:?}, trend {})",
                value,
                hemoglobin.status(),
                hemoglobin.trend.label()
            );
            Ok(())
        }
        Commands::Login {
            token,
            expires_in,
            remember,
        } => {
            store.dispatch(AuthAction::Login(LoginPayload {
                token: Some(token),
                expires_in,
                remember_me: remember,
                ..LoginPayload::default()
            }));
            if !store.is_authenticated() {
                bail!("Login failed");
            }
            let auth = &store.state().auth;
            if json {
                return print_json(auth);
            }
            println!(
                "Logged in, session {} expires {}",
                auth.session_id.as_deref().unwrap_or("-"),
                format_ms(auth.token_expiry)
            );
            Ok(())
        }
        Commands::Logout => {
            store.dispatch(AuthAction::Logout);
            if !json {
                println!("Logged out");
            }
            Ok(())
        }
        Commands::Report(report_command) => report(report_command, store, json),
        Commands::Notify { title, message } => {
            store.dispatch(NotificationAction::Add(
                NotificationDraft::new(title).with_message(message),
            ));
            let notifications = &store.state().notifications;
            if json {
                return print_json(&notifications.list[0]);
            }
            println!(
                "Added {} ({} unread)",
                notifications.list[0].id, notifications.unread_count
            );
            Ok(())
        }
        Commands::Notifications { unread } => {
            let notifications = &store.state().notifications;
            let list = if unread {
                notifications.unread()
            } else {
                notifications.list.iter().collect()
            };
            if json {
                return print_json(&list);
            }
            for n in &list {
                println!(
                    "{} {} {} - {}",
                    if n.read { " " } else { "*" },
                    n.id,
                    n.title,
                    n.message
                );
            }
            println!("{} unread", notifications.unread_count);
            Ok(())
        }
        Commands::Read { id } => {
            if id == "all" {
                store.dispatch(NotificationAction::MarkAllRead);
            } else {
                if store.state().notifications.find(&id).is_none() {
                    bail!("No notification with id {}", id);
                }
                store.dispatch(NotificationAction::MarkRead(NotificationIdPayload::new(id)));
            }
            if !json {
                println!("{} unread", store.state().notifications.unread_count);
            }
            Ok(())
        }
        Commands::Theme { theme } => {
            store.dispatch(UiAction::SetTheme(theme));
            if !json {
                println!("Theme set to {}", store.state().ui.theme);
            }
            Ok(())
        }
        Commands::Language { code } => {
            store.dispatch(UiAction::SetLanguage(code));
            if !json {
                println!("Language set to {}", store.state().ui.language);
            }
            Ok(())
        }
        Commands::Dispatch {
            action_type,
            payload,
        } => {
            let payload = match payload {
                Some(raw) => serde_json::from_str(&raw).context("Payload is not valid JSON")?,
                None => Value::Null,
            };
            let record = store.dispatch_raw(&action_type, payload);
            if let Action::Unrecognized { action_type, .. } = &record.action {
                bail!("Unknown action type {}", action_type);
            }
            if json {
                return print_json(store.state());
            }
            println!("Dispatched {}", record.action.name());
            Ok(())
        }
        Commands::Reset => {
            store.reset();
            if !json {
                println!("State reset");
            }
            Ok(())
        }
    }
}

fn report(command: ReportCommands, store: &mut Store, json: bool) -> Result<()> {
    match command {
        ReportCommands::Add {
            title,
            description,
            category,
        } => {
            if title.trim().is_empty() {
                bail!("Report title must not be empty");
            }
            let mut draft = ReportDraft::new(title).with_description(description);
            draft.category = category;
            store.dispatch(ReportAction::Add(draft));

            let reports = &store.state().reports;
            if json {
                return print_json(&reports.list[0]);
            }
            println!(
                "Submitted {} ({} pending)",
                reports.list[0].id, reports.statistics.pending
            );
            Ok(())
        }
        ReportCommands::List {
            status,
            page,
            limit,
        } => {
            store.dispatch(ReportAction::SetFilters(ReportFiltersPatch {
                status: Some(status.into()),
                ..ReportFiltersPatch::default()
            }));
            store.dispatch(ReportAction::SetPage(PagePayload {
                page: Some(page),
                limit: Some(limit),
            }));

            let reports = &store.state().reports;
            let page = reports.paginated();
            if json {
                return print_json(&json!({
                    "items": page.items,
                    "page": page.page,
                    "limit": page.limit,
                    "totalFiltered": page.total_filtered,
                    "totalPages": page.total_pages,
                    "statistics": reports.statistics,
                }));
            }
            for r in &page.items {
                println!(
                    "{:<28} {:<9} {} {}",
                    r.id,
                    r.status.label(),
                    format_ms(Some(r.created_at)),
                    r.title
                );
            }
            println!(
                "page {}/{} ({} reports)",
                page.page,
                page.total_pages.max(1),
                page.total_filtered
            );
            Ok(())
        }
        ReportCommands::Delete { id } => {
            if store.state().reports.find(&id).is_none() {
                bail!("No report with id {}", id);
            }
            store.dispatch(ReportAction::Delete(ReportIdPayload { id: id.clone() }));
            if !json {
                println!("Deleted {}", id);
            }
            Ok(())
        }
    }
}

fn status(store: &Store, json: bool) -> Result<()> {
    let state = store.state();
    if json {
        return print_json(&json!({
            "authenticated": store.is_authenticated(),
            "needsTokenRefresh": store.needs_token_refresh(),
            "consumption": state.user.vitamin_consumption,
            "statistics": state.user.statistics,
            "hemoglobin": state.user.hemoglobin,
            "hemoglobinStatus": state.user.hemoglobin.status(),
            "reports": state.reports.statistics,
            "unreadNotifications": state.notifications.unread_count,
            "theme": state.ui.theme,
            "language": state.ui.language,
        }));
    }

    let user = &state.user;
    println!(
        "Session:       {}",
        if store.is_authenticated() {
            "logged in"
        } else {
            "logged out"
        }
    );
    println!(
        "Consumption:   {}/{} ({}%), {} remaining",
        user.vitamin_consumption.count,
        user.vitamin_consumption.target,
        user.vitamin_consumption.percentage,
        user.vitamin_consumption.remaining()
    );
    println!(
        "Streak:        {} days (best {})",
        user.statistics.current_streak, user.statistics.longest_streak
    );
    match user.hemoglobin.current {
        Some(value) => println!(
            "Hemoglobin:    {:.1} g/dL, {:?}, trend {}",
            value,
            user.hemoglobin.status(),
            user.hemoglobin.trend.label()
        ),
        None => println!("Hemoglobin:    no readings"),
    }
    let stats = &state.reports.statistics;
    println!(
        "Reports:       {} total, {} pending, {} approved, {} rejected",
        stats.total, stats.pending, stats.approved, stats.rejected
    );
    println!("Notifications: {} unread", state.notifications.unread_count);
    println!("Display:       {} / {}", state.ui.theme, state.ui.language);
    Ok(())
}

fn print_consumption(state: &StateTree, json: bool) -> Result<()> {
    let consumption = &state.user.vitamin_consumption;
    if json {
        return print_json(consumption);
    }
    println!(
        "{}/{} tablets ({}%)",
        consumption.count, consumption.target, consumption.percentage
    );
    if consumption.is_target_reached() {
        println!("Target reached");
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", out);
    Ok(())
}

fn format_ms(ms: Option<i64>) -> String {
    ms.and_then(DateTime::from_timestamp_millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StatusArg;

    fn store() -> Store {
        Store::builder().build_detached()
    }

    #[test]
    fn test_consume_and_target() {
        let mut store = store();
        run(Commands::Target { count: 10 }, &mut store, true).unwrap();
        run(Commands::Consume, &mut store, true).unwrap();
        let consumption = &store.state().user.vitamin_consumption;
        assert_eq!(consumption.count, 1);
        assert_eq!(consumption.percentage, 10);
        assert!(run(Commands::Target { count: 0 }, &mut store, true).is_err());
    }

    #[test]
    fn test_invalid_hemoglobin_is_rejected() {
        let mut store = store();
        assert!(run(Commands::Hb { value: -1.0 }, &mut store, true).is_err());
        run(Commands::Hb { value: 11.2 }, &mut store, true).unwrap();
        assert_eq!(store.state().user.hemoglobin.current, Some(11.2));
    }

    #[test]
    fn test_report_lifecycle() {
        let mut store = store();
        run(
            Commands::Report(ReportCommands::Add {
                title: "Minum TTD".to_string(),
                description: String::new(),
                category: None,
            }),
            &mut store,
            true,
        )
        .unwrap();
        let id = store.state().reports.list[0].id.clone();

        run(
            Commands::Report(ReportCommands::List {
                status: StatusArg::Pending,
                page: 1,
                limit: 5,
            }),
            &mut store,
            true,
        )
        .unwrap();
        assert_eq!(store.state().reports.pagination.limit, 5);

        run(
            Commands::Report(ReportCommands::Delete { id: id.clone() }),
            &mut store,
            true,
        )
        .unwrap();
        assert!(store.state().reports.list.is_empty());
        assert!(run(
            Commands::Report(ReportCommands::Delete { id }),
            &mut store,
            true
        )
        .is_err());
    }

    #[test]
    fn test_dispatch_command() {
        let mut store = store();
        run(
            Commands::Dispatch {
                action_type: "UI_SET_LANGUAGE".to_string(),
                payload: Some("\"en\"".to_string()),
            },
            &mut store,
            true,
        )
        .unwrap();
        assert_eq!(store.state().ui.language, "en");

        assert!(run(
            Commands::Dispatch {
                action_type: "NOPE".to_string(),
                payload: None,
            },
            &mut store,
            true,
        )
        .is_err());
        assert!(run(
            Commands::Dispatch {
                action_type: "UI_SET_LANGUAGE".to_string(),
                payload: Some("{oops".to_string()),
            },
            &mut store,
            true,
        )
        .is_err());
    }

    #[test]
    fn test_read_notifications() {
        let mut store = store();
        run(
            Commands::Notify {
                title: "Minum tablet".to_string(),
                message: String::new(),
            },
            &mut store,
            true,
        )
        .unwrap();
        assert!(run(Commands::Read { id: "missing".to_string() }, &mut store, true).is_err());
        run(Commands::Read { id: "all".to_string() }, &mut store, true).unwrap();
        assert_eq!(store.state().notifications.unread_count, 0);
    }
}
