use binwatch_core::{
    BinLocation, BinRecord, Dashboard, GeoPoint,
    reports::{self, CategoryShare, MonthlyFill, ReportSummary, WeeklyFill},
    seed,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    BinMap,
    Reports,
}

impl Screen {
    pub(crate) const ALL: [Screen; 3] = [Screen::Dashboard, Screen::BinMap, Screen::Reports];

    pub(crate) fn title(self) -> &'static str {
        match self {
            Screen::Dashboard => "Dashboard",
            Screen::BinMap => "Bin Map",
            Screen::Reports => "Reports",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Screen::Dashboard => 0,
            Screen::BinMap => 1,
            Screen::Reports => 2,
        }
    }

    pub(crate) fn next(self) -> Self {
        match self {
            Screen::Dashboard => Screen::BinMap,
            Screen::BinMap => Screen::Reports,
            Screen::Reports => Screen::Dashboard,
        }
    }

    pub(crate) fn previous(self) -> Self {
        match self {
            Screen::Dashboard => Screen::Reports,
            Screen::BinMap => Screen::Dashboard,
            Screen::Reports => Screen::BinMap,
        }
    }
}

pub(crate) struct App {
    pub dashboard: Dashboard,

    pub screen: Screen,
    pub bin_list_index: usize,
    pub tick: usize,

    pub locations: Vec<BinLocation>,
    pub weekly: Vec<WeeklyFill>,
    pub monthly: Vec<MonthlyFill>,
    pub distribution: Vec<CategoryShare>,
}

impl App {
    pub(crate) fn new(dashboard: Dashboard) -> Self {
        Self {
            dashboard,
            screen: Screen::Dashboard,
            bin_list_index: 0,
            tick: 0,
            locations: seed::bin_locations(),
            weekly: reports::weekly_fill_levels(),
            monthly: reports::monthly_trend(),
            distribution: reports::category_distribution(),
        }
    }

    /// Add operator-provided positions, replacing known ones with the same id.
    pub(crate) fn with_locations(mut self, extra: Vec<BinLocation>) -> Self {
        for location in extra {
            self.locations.retain(|known| known.id != location.id);
            self.locations.push(location);
        }
        self
    }

    /// Every monitored bin in display order, with its position when known.
    pub(crate) fn map_entries(&self) -> Vec<(&BinRecord, Option<GeoPoint>)> {
        self.dashboard
            .bins()
            .iter()
            .map(|bin| {
                let position = self
                    .locations
                    .iter()
                    .find(|location| &location.id == bin.id())
                    .map(|location| location.position);
                (bin, position)
            })
            .collect()
    }

    pub(crate) fn summary(&self) -> ReportSummary {
        reports::summary(self.dashboard.bins().len())
    }

    pub(crate) fn selected_bin(&self) -> Option<&BinRecord> {
        self.dashboard.bins().get(self.bin_list_index)
    }

    pub(crate) fn select_previous_bin(&mut self) {
        self.bin_list_index = self.bin_list_index.saturating_sub(1);
    }

    pub(crate) fn select_next_bin(&mut self) {
        if self.bin_list_index + 1 < self.dashboard.bins().len() {
            self.bin_list_index += 1;
        }
    }

    pub(crate) fn advance_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use binwatch_core::{
        BinCategory, BinId, FillLevel, LastUpdated, RefreshSimulator, seed::seed_bins,
    };

    use super::*;

    fn test_app() -> App {
        let dashboard =
            Dashboard::new(seed_bins(), RefreshSimulator::seeded(5)).expect("seed ids are unique");
        App::new(dashboard)
    }

    #[test]
    fn map_entries_follow_dashboard_bins() {
        let bins = vec![
            BinRecord::new(
                "BIN-100",
                BinCategory::Plastic,
                FillLevel::clamped(40),
                "Lobby",
                LastUpdated::JustNow,
            ),
            BinRecord::new(
                "BIN-003",
                BinCategory::Metal,
                FillLevel::clamped(90),
                "Cafeteria",
                LastUpdated::JustNow,
            ),
        ];
        let dashboard = Dashboard::new(bins, RefreshSimulator::seeded(5)).expect("unique ids");
        let lobby = GeoPoint { lat: 40.75, lng: -73.98 };
        let app = App::new(dashboard).with_locations(vec![BinLocation {
            id: BinId::from("BIN-100"),
            position: lobby,
        }]);

        let entries: Vec<(&str, Option<GeoPoint>)> = app
            .map_entries()
            .into_iter()
            .map(|(bin, position)| (bin.id().0.as_str(), position))
            .collect();
        assert_eq!(
            entries,
            [
                ("BIN-100", Some(lobby)),
                ("BIN-003", Some(GeoPoint { lat: 40.7505, lng: -73.9934 })),
            ]
        );
    }

    #[test]
    fn configured_location_replaces_seed_position() {
        let moved = GeoPoint { lat: 1.0, lng: 2.0 };
        let app = test_app().with_locations(vec![BinLocation {
            id: BinId::from("BIN-001"),
            position: moved,
        }]);

        assert_eq!(app.locations.len(), 5);
        assert_eq!(
            app.map_entries().first().and_then(|(_, position)| *position),
            Some(moved)
        );
    }

    #[test]
    fn screens_cycle_both_ways() {
        for screen in Screen::ALL {
            assert_eq!(screen.next().previous(), screen);
        }
        assert_eq!(Screen::Reports.next(), Screen::Dashboard);
    }

    #[test]
    fn selection_stays_within_bins() {
        let mut app = test_app();
        app.select_previous_bin();
        assert_eq!(app.bin_list_index, 0);

        for _ in 0..10 {
            app.select_next_bin();
        }
        assert_eq!(app.bin_list_index, 4);
        assert_eq!(app.selected_bin().map(|bin| bin.id().0.as_str()), Some("BIN-005"));
    }
}
