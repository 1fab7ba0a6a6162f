//! Application state and composition.

use std::sync::Arc;
use std::time::Duration;

use frame_survivor_domain::ImageRef;

use crate::api::FrameResponder;
use crate::infrastructure::{
    ports::{CharacterProvider, ClockPort, CombatResolver, FrameRenderer, SessionRepo},
    session_locks::SessionLocks,
};
use crate::use_cases::{
    self,
    session::{BeginSession, ExploreSession, ResolveBattle, ViewBuilder},
};

/// Main application state.
///
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
    pub frames: FrameResponder,
}

/// Container for all use cases.
pub struct UseCases {
    pub session: use_cases::SessionUseCases,
    pub lookup: Arc<use_cases::LookupSloot>,
}

/// Port implementations the application is wired from.
pub struct AppPorts {
    pub sessions: Arc<dyn SessionRepo>,
    pub provider: Arc<dyn CharacterProvider>,
    pub resolver: Arc<dyn CombatResolver>,
    pub renderer: Arc<dyn FrameRenderer>,
    pub clock: Arc<dyn ClockPort>,
}

/// Tunables shared by the use cases.
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub upstream_timeout: Duration,
    pub display_utc_offset_hours: i32,
    /// Image shown for drawn battles.
    pub draw_card: ImageRef,
}

impl App {
    pub fn new(ports: AppPorts, options: AppOptions, frames: FrameResponder) -> Self {
        let locks = SessionLocks::new();
        let views = Arc::new(ViewBuilder::new(
            ports.renderer.clone(),
            options.draw_card,
            options.upstream_timeout,
        ));

        let begin = Arc::new(BeginSession::new(
            ports.sessions.clone(),
            ports.provider.clone(),
            ports.resolver.clone(),
            ports.renderer.clone(),
            ports.clock.clone(),
            locks.clone(),
            options.upstream_timeout,
            options.display_utc_offset_hours,
        ));
        let explore = Arc::new(ExploreSession::new(
            ports.sessions.clone(),
            views.clone(),
            locks.clone(),
        ));
        let battle = Arc::new(ResolveBattle::new(
            ports.sessions.clone(),
            ports.resolver.clone(),
            views,
            locks,
            options.upstream_timeout,
        ));

        let use_cases = UseCases {
            session: use_cases::SessionUseCases::new(begin, explore, battle),
            lookup: Arc::new(use_cases::LookupSloot::new(
                ports.provider,
                options.upstream_timeout,
            )),
        };

        Self { use_cases, frames }
    }
}
