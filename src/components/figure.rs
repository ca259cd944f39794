use web_sys::Element;
use yew::prelude::*;

use crate::config::ViewportConfig;
use crate::controller::ViewportController;

#[derive(Clone, Debug, PartialEq)]
pub struct LineSeries {
    pub label: String,
    pub color: String,
    pub points: Vec<(f64, f64)>,
}

#[derive(Properties, PartialEq, Clone)]
pub struct FigureProps {
    pub width: u32,
    pub height: u32,
    #[prop_or_default]
    pub title: Option<String>,
    pub series: Vec<LineSeries>,
    #[prop_or_default]
    pub config: ViewportConfig,
}

const PADDING: f64 = 50.0;

/// Maps data coordinates onto the padded plot area of a `width` x `height` figure.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Axes {
    width: f64,
    height: f64,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl Axes {
    fn fit(width: u32, height: u32, series: &[LineSeries]) -> Self {
        let pts = series.iter().flat_map(|s| s.points.iter().copied());
        let (mut x_min, mut x_max, mut y_min, mut y_max) =
            (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY);
        for (x, y) in pts {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
        if !x_min.is_finite() {
            (x_min, x_max) = (0.0, 1.0);
        }
        if !y_min.is_finite() {
            (y_min, y_max) = (0.0, 1.0);
        }
        Self {
            width: width as f64,
            height: height as f64,
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    fn scale_x(&self, x: f64) -> f64 {
        let span = (self.x_max - self.x_min).max(f64::EPSILON);
        PADDING + (x - self.x_min) / span * (self.width - 2.0 * PADDING)
    }

    // SVG y grows downwards.
    fn scale_y(&self, y: f64) -> f64 {
        let span = (self.y_max - self.y_min).max(f64::EPSILON);
        self.height - PADDING - (y - self.y_min) / span * (self.height - 2.0 * PADDING)
    }
}

/// Everything that feeds the initial `viewBox` or the zoom limits; the
/// controller is rebuilt whenever one of these changes.
fn binding_deps(props: &FigureProps) -> (u32, u32, ViewportConfig) {
    (props.width, props.height, props.config.clone())
}

#[function_component(Figure)]
pub fn figure(props: &FigureProps) -> Html {
    let svg_ref = use_node_ref();

    // Bind the pan/zoom controller once the <svg> is in the DOM; dropping it unbinds.
    {
        let svg_ref = svg_ref.clone();
        use_effect_with(binding_deps(props), move |_| {
            let controller = match svg_ref.cast::<Element>() {
                None => {
                    log::debug!("figure has no mounted <svg>, pan/zoom inactive");
                    None
                }
                Some(el) => match ViewportController::attach(el) {
                    Ok(c) => Some(c),
                    Err(err) => {
                        log::error!("pan/zoom disabled: {err}");
                        None
                    }
                },
            };
            move || drop(controller)
        });
    }

    let axes = Axes::fit(props.width, props.height, &props.series);
    let config_json = serde_json::to_string(&props.config).unwrap_or_default();
    let view_box = format!("0 0 {} {}", props.width, props.height);
    let (left, right) = (PADDING, axes.width - PADDING);
    let (top, bottom) = (PADDING, axes.height - PADDING);

    let series_html = props.series.iter().map(|s| {
        let polyline = s
            .points
            .iter()
            .map(|&(x, y)| format!("{},{}", axes.scale_x(x), axes.scale_y(y)))
            .collect::<Vec<_>>()
            .join(" ");
        html! {
            <g key={s.label.clone()}>
                <polyline fill="none" stroke={s.color.clone()} stroke-width="2" points={polyline} />
                { for s.points.iter().map(|&(x, y)| html! {
                    <circle cx={axes.scale_x(x).to_string()} cy={axes.scale_y(y).to_string()} r="4" fill={s.color.clone()}>
                        <title>{ format!("{}: ({x}, {y})", s.label) }</title>
                    </circle>
                }) }
            </g>
        }
    });

    html! {
        <svg ref={svg_ref} xmlns="http://www.w3.org/2000/svg"
            width={props.width.to_string()} height={props.height.to_string()}
            viewBox={view_box} data-viewport={config_json}
            style="user-select:none; border:1px solid #30363d; border-radius:8px;">
            <rect width="100%" height="100%" fill="white" />
            <line x1={left.to_string()} y1={bottom.to_string()} x2={right.to_string()} y2={bottom.to_string()} stroke="#333" />
            <line x1={left.to_string()} y1={top.to_string()} x2={left.to_string()} y2={bottom.to_string()} stroke="#333" />
            if let Some(title) = &props.title {
                <text x={(axes.width / 2.0).to_string()} y={(PADDING / 2.0).to_string()}
                    text-anchor="middle" font-size="16" font-family="sans-serif">{ title.clone() }</text>
            }
            { for series_html }
        </svg>
    }
}
