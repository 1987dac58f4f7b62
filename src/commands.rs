use crate::cli::{Cli, Commands, NotificationAction, OutputFormat};
use crate::output::emit_output;
use chrono::{DateTime, Utc};
use portcall::config::load_config;
use portcall::domain::{BerthId, CargoManifest, NotificationId, OfficerId, VesselReference};
use portcall::infrastructure::SCHEMA_SQL;
use portcall::{
    Config, Credential, DailyScheduleService, HttpPortDataGateway, NotificationLifecycleService,
    PgNotificationStore, PortCallError, Result, StoredNotification,
};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::info;

pub async fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli).await?;
    match cli.command {
        Commands::Schedule { date, token } => {
            schedule_command(&cli.output, &config, &date, token).await
        }
        Commands::Notification { action } => {
            notification_command(&cli.output, &config, action).await
        }
        Commands::InitDb { schema } => init_db_command(&cli.output, &config, schema).await,
    }
}

async fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = load_config(cli.config.clone()).await?;
    if let Some(url) = cli.database_url.clone() {
        config.database_url = Some(url);
    }
    if let Some(url) = cli.gateway_url.clone() {
        config.gateway_url = url;
    }
    Ok(config)
}

async fn schedule_command(
    output: &OutputFormat,
    config: &Config,
    date: &str,
    token: Option<String>,
) -> Result<()> {
    let credential = Credential::new(
        token
            .or_else(|| config.api_token.clone())
            .unwrap_or_default(),
    );
    let gateway = HttpPortDataGateway::new(&config.gateway_url, config.request_timeout())?;
    let service = DailyScheduleService::new(gateway, config.schedule_settings());

    let report = service.generate(date, &credential).await?;
    emit_output(output, "schedule", serde_json::to_value(&report)?);
    Ok(())
}

async fn open_store(config: &Config) -> Result<PgNotificationStore> {
    let url = config.database_url.as_deref().ok_or_else(|| {
        PortCallError::ConfigError(
            "No database URL configured; pass --database-url or set PORTCALL_DATABASE_URL"
                .to_string(),
        )
    })?;
    PgNotificationStore::connect(url, None).await
}

async fn notification_command(
    output: &OutputFormat,
    config: &Config,
    action: NotificationAction,
) -> Result<()> {
    let service = NotificationLifecycleService::new(open_store(config).await?);

    let (command, stored) = match action {
        NotificationAction::Create { vessel, hazardous } => (
            "notification create",
            service
                .create_draft(VesselReference::new(vessel), hazardous)
                .await?,
        ),
        NotificationAction::Show { id } => {
            ("notification show", service.get(&NotificationId::new(id)).await?)
        }
        NotificationAction::Dates {
            id,
            arrival,
            departure,
        } => (
            "notification dates",
            service
                .update_dates(
                    &NotificationId::new(id),
                    parse_timestamp(arrival.as_deref())?,
                    parse_timestamp(departure.as_deref())?,
                )
                .await?,
        ),
        NotificationAction::SetManifest {
            id,
            direction,
            file,
        } => {
            let manifest = read_manifest(&file).await?;
            (
                "notification set-manifest",
                service
                    .set_manifest(&NotificationId::new(id), direction.into(), manifest)
                    .await?,
            )
        }
        NotificationAction::RemoveManifest { id, direction } => {
            let (stored, removed) = service
                .remove_manifest(&NotificationId::new(id), direction.into())
                .await?;
            if removed.is_none() {
                info!(id = %stored.notification.id(), "no manifest in that slot");
            }
            ("notification remove-manifest", stored)
        }
        NotificationAction::Submit { id } => (
            "notification submit",
            service.submit(&NotificationId::new(id)).await?,
        ),
        NotificationAction::Accept { id } => (
            "notification accept",
            service.accept(&NotificationId::new(id)).await?,
        ),
        NotificationAction::Approve { id, berth, officer } => (
            "notification approve",
            service
                .approve(
                    &NotificationId::new(id),
                    BerthId::new(berth),
                    OfficerId::new(officer),
                )
                .await?,
        ),
        NotificationAction::Reject {
            id,
            reason,
            officer,
        } => (
            "notification reject",
            service
                .reject(&NotificationId::new(id), &reason, OfficerId::new(officer))
                .await?,
        ),
        NotificationAction::Resubmit { id } => (
            "notification resubmit",
            service.resubmit(&NotificationId::new(id)).await?,
        ),
        NotificationAction::Draft { id } => (
            "notification draft",
            service.convert_to_draft(&NotificationId::new(id)).await?,
        ),
        NotificationAction::Reopen {
            id,
            arrival,
            departure,
        } => (
            "notification reopen",
            service
                .update_and_resubmit(
                    &NotificationId::new(id),
                    parse_timestamp(arrival.as_deref())?,
                    parse_timestamp(departure.as_deref())?,
                )
                .await?,
        ),
        NotificationAction::Delete { id } => {
            let id = NotificationId::new(id);
            service.delete(&id).await?;
            emit_output(
                output,
                "notification delete",
                json!({"id": id, "deleted": true, "message": format!("Deleted notification {id}")}),
            );
            return Ok(());
        }
    };

    emit_output(output, command, notification_payload(&stored)?);
    Ok(())
}

async fn init_db_command(
    output: &OutputFormat,
    config: &Config,
    schema: Option<PathBuf>,
) -> Result<()> {
    let store = open_store(config).await?;
    let schema_sql = match &schema {
        Some(path) => tokio::fs::read_to_string(path).await.map_err(|e| {
            PortCallError::ConfigError(format!("Failed to read schema {}: {e}", path.display()))
        })?,
        None => SCHEMA_SQL.to_string(),
    };
    store.initialize_schema_from_sql(&schema_sql).await?;
    emit_output(
        output,
        "init-db",
        json!({
            "schema": schema.map_or_else(|| "bundled".to_string(), |p| p.display().to_string()),
            "message": "Database schema initialized",
        }),
    );
    Ok(())
}

fn notification_payload(stored: &StoredNotification) -> Result<serde_json::Value> {
    let mut payload = serde_json::to_value(stored.notification.snapshot())?;
    if let Some(fields) = payload.as_object_mut() {
        fields.insert("version".to_string(), json!(stored.version));
    }
    Ok(payload)
}

fn parse_timestamp(raw: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    raw.map(|value| {
        DateTime::parse_from_rfc3339(value.trim())
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(|e| {
                PortCallError::ValidationFailed(format!(
                    "Invalid timestamp '{value}', expected RFC 3339: {e}"
                ))
            })
    })
    .transpose()
}

async fn read_manifest(path: &Path) -> Result<CargoManifest> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        PortCallError::ConfigError(format!("Failed to read manifest {}: {e}", path.display()))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        PortCallError::ValidationFailed(format!("Invalid manifest {}: {e}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::{notification_payload, parse_timestamp};
    use portcall::domain::{
        CargoManifest, ManifestDirection, ManifestLine, NotificationId, VesselReference,
        VisitNotification,
    };
    use portcall::{PortCallError, StoredNotification};

    #[test]
    fn timestamps_accept_offsets_and_normalise_to_utc() {
        let parsed = parse_timestamp(Some("2026-03-14T08:00:00+02:00"))
            .unwrap()
            .unwrap();

        assert_eq!(parsed.to_rfc3339(), "2026-03-14T06:00:00+00:00");
        assert_eq!(parse_timestamp(None).unwrap(), None);
    }

    #[test]
    fn malformed_timestamp_is_a_validation_failure() {
        let result = parse_timestamp(Some("tomorrow"));

        assert!(matches!(result, Err(PortCallError::ValidationFailed(_))));
    }

    #[test]
    fn payload_includes_status_and_version() {
        let stored = StoredNotification {
            notification: VisitNotification::new_draft(
                NotificationId::new("vn-1"),
                VesselReference::new("IMO-1"),
                false,
            ),
            version: 3,
        };

        let payload = notification_payload(&stored).unwrap();

        assert_eq!(payload["status"], "in_progress");
        assert_eq!(payload["version"], 3);
        assert_eq!(payload["id"], "vn-1");
    }

    #[test]
    fn payload_uses_camel_case_like_the_schedule_report() {
        let mut notification = VisitNotification::new_draft(
            NotificationId::new("vn-1"),
            VesselReference::new("IMO-1"),
            true,
        );
        notification
            .set_manifest(
                ManifestDirection::Load,
                CargoManifest::new(ManifestDirection::Load, vec![ManifestLine::new("MSCU1234567")]),
            )
            .unwrap();
        let stored = StoredNotification {
            notification,
            version: 2,
        };

        let payload = notification_payload(&stored).unwrap();

        assert_eq!(payload["referredVessel"], "IMO-1");
        assert_eq!(payload["isHazardous"], true);
        assert!(payload.get("arrivalDate").is_some());
        assert!(payload.get("referred_vessel").is_none());
        assert_eq!(
            payload["loadingManifest"]["lines"][0]["containerId"],
            "MSCU1234567"
        );
    }
}
