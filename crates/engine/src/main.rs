//! Homestead engine - demo entry point.
//!
//! Builds an in-memory world, places one structure end to end on the tokio
//! scheduler and prints what the world recorded.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use homestead_domain::{
    Actor, ActorName, BuildingUse, Deed, Footprint, PlayerProfile, StructureKind,
    StructureTemplate,
};
use homestead_engine::infrastructure::clock::SystemClock;
use homestead_engine::infrastructure::handles::Shared;
use homestead_engine::infrastructure::in_memory::{
    FixedRegionalPolicy, FootprintAuthority, InMemoryObjectFactory, InMemoryPartition, MailOutbox,
    TemplateCatalog, TracingAuditLog,
};
use homestead_engine::infrastructure::ports::{EntityKind, WorldPartition};
use homestead_engine::infrastructure::scheduler::TokioScheduler;
use homestead_engine::infrastructure::settings::PlacementSettings;
use homestead_engine::use_cases::placement::{PlacementRequest, PlacementServices};
use homestead_engine::App;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const HOUSE: &str = "object/building/player/player_house_tatooine_small_style_01.iff";
const HOUSE_MARKER: &str =
    "object/building/player/construction/construction_player_house_tatooine_small_style_01.iff";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "homestead_engine=debug,audit=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Homestead engine demo");

    let settings = Arc::new(PlacementSettings::from_env());
    let partition = Arc::new(
        InMemoryPartition::new("tatooine").with_policy(Arc::new(FixedRegionalPolicy::new(30))),
    );
    let templates = Arc::new(
        TemplateCatalog::new().with_template(
            StructureTemplate::new(HOUSE, 1)
                .with_footprint(Footprint::new(2, 2))
                .with_construction_marker(HOUSE_MARKER)
                .with_object_name("@building_name:housing_tatt_small")
                .with_kind(StructureKind::Building {
                    has_sign: true,
                    usage: BuildingUse::Residential,
                }),
        ),
    );
    let audit = Arc::new(TracingAuditLog::new());
    let outbox = Arc::new(MailOutbox::new());

    let app = App::new(PlacementServices {
        templates: templates.clone(),
        objects: Arc::new(InMemoryObjectFactory::new()),
        authority: Arc::new(FootprintAuthority::new(templates, partition.clone())),
        scheduler: Arc::new(TokioScheduler::current()),
        audit: audit.clone(),
        notifier: outbox.clone(),
        clock: Arc::new(SystemClock::new()),
        settings,
    });

    let deed = Deed::new(HOUSE);
    let deed = Shared::new(deed.id(), deed);
    let actor = Actor::new(ActorName::new("Ana")?).with_profile(PlayerProfile::new(10));
    let actor = Shared::new(actor.id(), actor);
    actor.lock().await.inventory_mut().transfer_in(deed.id());
    let world: Arc<dyn WorldPartition> = partition.clone();

    let (session, status) = app
        .use_cases
        .placement
        .start
        .execute_and_begin(
            &actor,
            &deed,
            &world,
            PlacementRequest {
                x: 3512.0,
                y: -4820.0,
                angle: 90,
            },
        )
        .await?;
    tracing::info!(session_id = %session.id(), status = status.code(), "Placement requested");

    let sessions = &app.use_cases.placement.sessions;
    tokio::time::timeout(Duration::from_secs(60), async {
        while !sessions.is_empty() {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    })
    .await
    .context("placement did not finish in time")?;

    tracing::info!(
        state = %session.state(),
        structures = partition.count(EntityKind::Structure).await,
        zones = partition.count(EntityKind::ExclusionZone).await,
        "Placement finished"
    );
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "audit": audit.entries().await,
            "mail": outbox.sent().await,
        }))?
    );

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
