use super::figure::{Figure, LineSeries};
use crate::config::ViewportConfig;
use yew::prelude::*;

fn demo_series() -> Vec<LineSeries> {
    let xs: Vec<f64> = (0..=24).map(|i| i as f64 * 0.5).collect();
    vec![
        LineSeries {
            label: "sin".into(),
            color: "#1f77b4".into(),
            points: xs.iter().map(|&x| (x, x.sin())).collect(),
        },
        LineSeries {
            label: "damped".into(),
            color: "#ff7f0e".into(),
            points: xs.iter().map(|&x| (x, (-x / 6.0).exp() * x.cos())).collect(),
        },
    ]
}

#[function_component(App)]
pub fn app() -> Html {
    let series = use_memo((), |_| demo_series());

    html! {
        <div id="root" style="padding:12px; font-family:sans-serif;">
            <h2>{"Pan & zoom"}</h2>
            <p>{"Drag to pan, scroll to zoom about the pointer."}</p>
            <Figure width={800} height={600} title={Some("Signals".to_string())}
                series={(*series).clone()} config={ViewportConfig::default()} />
        </div>
    }
}
