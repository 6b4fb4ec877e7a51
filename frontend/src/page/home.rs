use seed::{prelude::*, *};

const OBJECTIVES: [&str; 3] = [
    "Map View: Geographical representation with each street light marked by a pin.",
    "Detailed Information for each light: Installation date, bulb manufacturer, warranty, and cost details.",
    "Maintenance history and issue reports for each street light.",
];

const BENEFITS: [&str; 3] = [
    "Streamline the management of street lights.",
    "Enhance maintenance efficiency and reduce costs.",
    "Improve budgeting and decision-making for infrastructure investments.",
];

pub fn view<Ms: 'static>() -> Node<Ms> {
    div![
        C!["home-container"],
        header![
            C!["home-header"],
            h1!["Street Light Management Dashboard"],
            p![
                C!["home-subtitle"],
                "Efficiently manage and maintain street lights within your Nigam"
            ],
        ],
        section![
            C!["home-card"],
            h2![C!["section-title"], "Overview"],
            p![
                C!["section-content"],
                "The management of street lights within various Nigams presents significant \
                 challenges, particularly in terms of maintenance and cost analysis. With numerous \
                 street lights installed across different areas, it becomes crucial to have an \
                 efficient system that enables Nigams to monitor and manage these assets effectively."
            ],
        ],
        card_list("Objectives", &OBJECTIVES),
        card_list("Benefits", &BENEFITS),
    ]
}

fn card_list<Ms: 'static>(title: &str, items: &[&str]) -> Node<Ms> {
    section![
        C!["home-card"],
        h2![C!["section-title"], title],
        ul![C!["section-list"], items.iter().map(|item| li![*item])],
    ]
}
