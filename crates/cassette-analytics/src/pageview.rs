//! Pageview choreography: leave-before-enter and the unload flush.

use cassette_core::models::event_names::{PAGEVIEW, PAGE_LEAVE};
use cassette_core::models::{ActivePageview, EventEnvelope, LeaveReason, Properties, PropertyValue};
use chrono::{DateTime, Utc};

/// Events produced by a route change, in emission order.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteChange {
    /// `page_leave` for the previous route, if one was active.
    pub leave: Option<EventEnvelope>,
    pub pageview: EventEnvelope,
}

impl RouteChange {
    pub fn into_events(self) -> Vec<EventEnvelope> {
        self.leave.into_iter().chain([self.pageview]).collect()
    }
}

/// Holds the active pageview and whether the unload handler is bound.
#[derive(Debug, Default)]
pub struct PageviewTracker {
    active: Option<ActivePageview>,
    unload_bound: bool,
}

impl PageviewTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&ActivePageview> {
        self.active.as_ref()
    }

    /// Record `route` as active. `None` when it already is.
    ///
    /// `route` is expected to be canonical already.
    pub fn enter(
        &mut self,
        route: &str,
        now: DateTime<Utc>,
        session_id: &str,
    ) -> Option<RouteChange> {
        if self.active.as_ref().is_some_and(|a| a.route == route) {
            return None;
        }

        let previous = self.active.take();
        let leave = previous
            .as_ref()
            .map(|p| leave_event(p, now, LeaveReason::RouteChange));

        let mut properties = Properties::new();
        properties.insert("route".into(), PropertyValue::from(route));
        if let Some(p) = &previous {
            properties.insert("previous_route".into(), PropertyValue::from(p.route.as_str()));
        }

        self.active = Some(ActivePageview {
            route: route.to_string(),
            started_at: now,
            session_id: session_id.to_string(),
        });

        Some(RouteChange {
            leave,
            pageview: EventEnvelope::new(PAGEVIEW, properties),
        })
    }

    /// Bind the unload handler. Returns whether this call bound it.
    pub fn bind_unload_handler(&mut self) -> bool {
        !std::mem::replace(&mut self.unload_bound, true)
    }

    pub fn is_unload_bound(&self) -> bool {
        self.unload_bound
    }

    /// The final `page_leave`, when bound and a pageview is active. Clears
    /// the active pageview.
    pub fn unload(&mut self, now: DateTime<Utc>) -> Option<EventEnvelope> {
        if !self.unload_bound {
            return None;
        }
        self.active
            .take()
            .map(|p| leave_event(&p, now, LeaveReason::Unload))
    }

    pub fn reset(&mut self) {
        self.active = None;
        self.unload_bound = false;
    }
}

fn leave_event(page: &ActivePageview, now: DateTime<Utc>, reason: LeaveReason) -> EventEnvelope {
    let mut properties = Properties::new();
    properties.insert("route".into(), PropertyValue::from(page.route.as_str()));
    properties.insert(
        "duration_seconds".into(),
        PropertyValue::Integer(page.duration_seconds(now)),
    );
    properties.insert("leave_reason".into(), PropertyValue::from(reason.as_str()));
    EventEnvelope::new(PAGE_LEAVE, properties)
}
