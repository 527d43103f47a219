//! Active-sessions panel. The panel fetches once on mount and afterwards only
//! changes through revocations; there is no polling. Results that resolve after
//! `unmount` are dropped without touching state or notifying.

use crate::{
    components::{Notifier, Toast},
    features::sessions::{browser_label, DeviceKind, Session},
    shared::{AppError, GatewayClient},
};
use std::{
    collections::BTreeSet,
    fmt::Write,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex, MutexGuard, PoisonError,
    },
};
use tracing::debug;

pub const CONFIRM_REVOKE: &str = "Are you sure you want to terminate this session? This will log out the device and require re-authentication.";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PanelState {
    #[default]
    Loading,
    Loaded {
        /// Server order, never re-sorted locally.
        sessions: Vec<Session>,
        /// Rows with a revocation in flight.
        revoking: BTreeSet<String>,
    },
}

#[derive(Debug)]
pub enum RevokeOutcome {
    Revoked,
    Failed(AppError),
    /// Not loaded yet, already revoking this row, or unmounted.
    Ignored,
}

pub struct SessionsPanel<'a> {
    gateway: &'a GatewayClient,
    notifier: &'a dyn Notifier,
    state: Mutex<PanelState>,
    mounted: AtomicBool,
}

impl<'a> SessionsPanel<'a> {
    pub fn new(gateway: &'a GatewayClient, notifier: &'a dyn Notifier) -> Self {
        Self {
            gateway,
            notifier,
            state: Mutex::new(PanelState::Loading),
            mounted: AtomicBool::new(true),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PanelState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn state(&self) -> PanelState {
        self.lock().clone()
    }

    /// Sessions currently shown; empty while loading.
    #[must_use]
    pub fn sessions(&self) -> Vec<Session> {
        match &*self.lock() {
            PanelState::Loading => Vec::new(),
            PanelState::Loaded { sessions, .. } => sessions.clone(),
        }
    }

    /// Fetches the list. A failed fetch degrades to an empty list plus a toast.
    pub async fn mount(&self) {
        let result = self.gateway.list_sessions().await;

        if !self.is_mounted() {
            debug!("sessions fetched after unmount, discarding");
            return;
        }

        let sessions = result.unwrap_or_else(|err| {
            debug!(error = %err, "failed to fetch sessions");
            self.notifier
                .notify(Toast::error("Error", "Failed to fetch sessions"));
            Vec::new()
        });

        *self.lock() = PanelState::Loaded {
            sessions,
            revoking: BTreeSet::new(),
        };
    }

    /// Revokes one session. Only the matching row is marked busy; success
    /// removes exactly that id, failure leaves the list as it was.
    pub async fn revoke(&self, session_id: &str) -> RevokeOutcome {
        {
            let mut state = self.lock();
            let PanelState::Loaded { revoking, .. } = &mut *state else {
                return RevokeOutcome::Ignored;
            };
            if !revoking.insert(session_id.to_string()) {
                return RevokeOutcome::Ignored;
            }
        }

        let result = self.gateway.revoke_session(session_id).await;

        if !self.is_mounted() {
            debug!(session_id, "revocation resolved after unmount, discarding");
            return RevokeOutcome::Ignored;
        }

        {
            let mut state = self.lock();
            if let PanelState::Loaded { sessions, revoking } = &mut *state {
                revoking.remove(session_id);
                if result.is_ok() {
                    sessions.retain(|session| session.id != session_id);
                }
            }
        }

        match result {
            Ok(()) => {
                self.notifier.notify(Toast::success(
                    "Session terminated",
                    "The session has been successfully terminated.",
                ));
                RevokeOutcome::Revoked
            }
            Err(err) => {
                self.notifier
                    .notify(Toast::error("Error", "Failed to terminate session"));
                RevokeOutcome::Failed(err)
            }
        }
    }

    /// Marks the panel gone; in-flight results are discarded from now on.
    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::SeqCst);
    }

    #[must_use]
    pub fn render(&self) -> String {
        render(&self.state())
    }
}

#[must_use]
pub fn render(state: &PanelState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Active Sessions");

    match state {
        PanelState::Loading => {
            for _ in 0..3 {
                let _ = writeln!(out, "  ░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░");
            }
        }
        PanelState::Loaded { sessions, revoking } => {
            let _ = writeln!(out, "Manage your active sessions across different devices");
            let _ = writeln!(out);
            if sessions.is_empty() {
                let _ = writeln!(out, "  No active sessions found");
            }
            for session in sessions {
                render_row(&mut out, session, revoking.contains(&session.id));
            }
        }
    }

    out
}

fn render_row(out: &mut String, session: &Session, busy: bool) {
    let device = DeviceKind::classify(&session.user_agent);
    let badge = if session.active { "Active" } else { "Inactive" };
    let _ = writeln!(
        out,
        "  [{device}] {}  ({badge})",
        browser_label(&session.user_agent)
    );
    let _ = writeln!(
        out,
        "    Location: {}   Created: {}",
        session.location_label(),
        session.created_label()
    );
    let _ = write!(out, "    IP: {}   ID: {}", session.ip_address, session.id);
    if busy {
        let _ = write!(out, "   (terminating...)");
    }
    let _ = writeln!(out);
}
