use handlebars::Handlebars;
use std::sync::Arc;

pub type Hbs = Arc<Handlebars<'static>>;

pub fn build_handlebars() -> Hbs {
    let mut hb = Handlebars::new();

    // Layout + pages
    hb.register_template_string("layouts/base", include_str!("../../templates/layouts/base.hbs"))
        .expect("template layouts/base");

    hb.register_template_string("pages/dashboard", include_str!("../../templates/pages/dashboard.hbs"))
        .expect("template pages/dashboard");
    hb.register_template_string("pages/not_found", include_str!("../../templates/pages/not_found.hbs"))
        .expect("template pages/not_found");

    // Partial endpoints
    hb.register_template_string("partials/stocks_table", include_str!("../../templates/partials/stocks_table.hbs"))
        .expect("template partials/stocks_table");
    hb.register_template_string("partials/recent_alerts", include_str!("../../templates/partials/recent_alerts.hbs"))
        .expect("template partials/recent_alerts");
    hb.register_template_string("partials/alert_rules", include_str!("../../templates/partials/alert_rules.hbs"))
        .expect("template partials/alert_rules");
    hb.register_template_string("partials/status_pill", include_str!("../../templates/partials/status_pill.hbs"))
        .expect("template partials/status_pill");

    Arc::new(hb)
}
