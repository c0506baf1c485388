pub mod charge_advisor_card;
pub mod demand_history_view;
pub mod gauge;

pub use charge_advisor_card::ChargeAdvisorCard;
pub use demand_history_view::DemandHistoryView;
pub use gauge::Gauge;
