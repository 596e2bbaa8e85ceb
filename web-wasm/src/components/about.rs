//! About（静的な情報ビュー）

use leptos::prelude::*;

const TEAM_MEMBERS: [(&str, &str); 3] = [
    (
        "Abdullah Naveed",
        "Contributed to all aspects of the project, including full-stack development, AI integration, and system design.",
    ),
    (
        "Saqib Ali Butt",
        "Contributed to all aspects of the project, including full-stack development, AI integration, and system design.",
    ),
    (
        "Anwar Karim",
        "Contributed to all aspects of the project, including full-stack development, AI integration, and system design.",
    ),
];

#[component]
pub fn About() -> impl IntoView {
    view! {
        <div class="about-view">
            <h2>"About Us"</h2>
            <p class="subtitle">"Meet the team behind EcoScout"</p>

            <div class="team-cards-container">
                {TEAM_MEMBERS
                    .into_iter()
                    .map(|(name, description)| {
                        let initials: String = name
                            .split_whitespace()
                            .filter_map(|part| part.chars().next())
                            .collect();
                        view! {
                            <div class="about-card">
                                <div class="avatar-circle">{initials}</div>
                                <h3>{name}</h3>
                                <p>{description}</p>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
