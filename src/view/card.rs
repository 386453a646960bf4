//! Service result cards and the discovery result area.

use crate::model::Service;
use crate::session::DiscoveryState;

pub const NO_SERVICES_MESSAGE: &str = "No services found nearby.";

/// One result card. Addresses and distances are omitted when
/// `hide_location` is set.
pub fn render_card(service: &Service, hide_location: bool) -> String {
    let mut lines = vec![service.name.clone(), format!("  {}", service.category.label())];

    if !hide_location {
        if !service.address.is_empty() {
            lines.push(format!("  {}", service.address));
        }
        if let Some(km) = service.distance_km {
            lines.push(format!("  {} km away", format_km(km)));
        }
    }

    if let Some(rating) = service.rating {
        match service.reviews {
            Some(reviews) => lines.push(format!("  ★ {rating:.1} ({reviews} reviews)")),
            None => lines.push(format!("  ★ {rating:.1}")),
        }
    }

    match service.open_now {
        Some(true) => lines.push("  Open Now".to_string()),
        Some(false) => lines.push("  Closed".to_string()),
        None => {}
    }

    if let Some(ref phone) = service.phone {
        lines.push(format!("  ☎ {phone}"));
    }

    if let Some(ref url) = service.maps_url {
        lines.push(format!("  Get Directions: {url}"));
    }

    lines.join("\n")
}

fn format_km(km: f64) -> String {
    let s = format!("{km:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// What the result area shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResultsView<'a> {
    /// Nothing searched yet; the area is hidden.
    Hidden,
    Loading,
    Error(&'a str),
    Empty,
    Results(&'a [Service]),
}

impl<'a> ResultsView<'a> {
    pub fn from_state(state: &'a DiscoveryState) -> Self {
        match state {
            DiscoveryState::Idle => Self::Hidden,
            DiscoveryState::Loading => Self::Loading,
            DiscoveryState::Failed(msg) => Self::Error(msg),
            DiscoveryState::Loaded(services) if services.is_empty() => Self::Empty,
            DiscoveryState::Loaded(services) => Self::Results(services),
        }
    }

    pub fn render(&self, hide_location: bool) -> String {
        match self {
            Self::Hidden => String::new(),
            Self::Loading => "Loading services...".to_string(),
            Self::Error(msg) => format!("Services Found (0)\n! {msg}"),
            Self::Empty => format!("Services Found (0)\n{NO_SERVICES_MESSAGE}"),
            Self::Results(services) => {
                let mut out = vec![format!("Services Found ({})", services.len())];
                out.extend(
                    services
                        .iter()
                        .enumerate()
                        .map(|(i, s)| format!("{}. {}", i + 1, render_card(s, hide_location))),
                );
                out.join("\n\n")
            }
        }
    }
}
