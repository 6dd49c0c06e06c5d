//! Server-rendered inference form.

use crate::model::PredictionView;
use data_facade::{FeatureVector, Preset, FEATURE_COLUMNS, FEATURE_COUNT, PRESETS};
use std::fmt::Write;

pub const PAGE_TITLE: &str = "Deep-Space Exoplanet Validator";
pub const PAGE_SUBTITLE: &str = "Advanced 11-Dimensional Telemetry Analysis";
pub const SUBMIT_LABEL: &str = "Execute Classification";
pub const PROBABILITY_LABEL: &str = "Probability of Verification";

/// Shown instead of the form while no artifact exists.
pub const MODEL_MISSING_MESSAGE: &str = "Model artifact not found. Please train the model first.";

/// Input labels in model order.
pub const FIELD_LABELS: [&str; FEATURE_COUNT] = [
    "Period (Days)",
    "Duration (Hours)",
    "Depth (PPM)",
    "Planet Radius (Earth=1)",
    "Signal-to-Noise",
    "Equilibrium Temp (K)",
    "Stellar Radius (Sun=1)",
    "Stellar Temp (K)",
    "Gravity (log(g))",
    "Insolation Flux",
    "Kepler Magnitude",
];

/// Panel headings and the feature indices each one holds.
const PANELS: [(&str, std::ops::Range<usize>); 3] = [
    ("1. Transit Signatures", 0..4),
    ("2. Stellar &amp; Environmental Properties", 4..8),
    ("3. Advanced Gravity &amp; Optics", 8..11),
];

const STYLE: &str = "body{font-family:sans-serif;background:#0b0d17;color:#e6e6e6;margin:2rem}\
.panels{display:flex;gap:1.5rem;flex-wrap:wrap}\
.panel{flex:1;min-width:14rem}\
label{display:block;margin-top:.6rem}\
input,select{width:100%;padding:.3rem}\
button{margin-top:1.2rem;padding:.6rem 1.2rem}\
.status{padding:.8rem;margin-top:1rem;font-weight:bold}\
.success{background:#1d4d2b}.error{background:#5c1f1f}\
.bar{background:#333;height:1rem;margin-top:.5rem}\
.bar div{background:#4caf50;height:100%}";

/// What the page shows below the form.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Form only.
    Ready,
    /// A classified observation.
    Classified(PredictionView),
    /// The submitted values could not be used.
    Rejected(String),
    /// The model could not be loaded. The form is not shown.
    Unavailable(String),
}

/// Everything needed to render the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub preset: &'static Preset,
    pub values: [String; FEATURE_COUNT],
    pub outcome: Outcome,
}

impl PageView {
    /// Form pre-filled from a preset.
    pub fn for_preset(preset: &'static Preset) -> Self {
        Self {
            preset,
            values: format_values(&preset.features),
            outcome: Outcome::Ready,
        }
    }

    pub fn with_values(mut self, values: [String; FEATURE_COUNT]) -> Self {
        self.values = values;
        self
    }

    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = outcome;
        self
    }

    pub fn render(&self) -> String {
        let mut html = String::with_capacity(4096);
        let _ = write!(
            html,
            "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
             <title>{title}</title><style>{STYLE}</style></head><body>\
             <h1>{title}</h1><h3>{PAGE_SUBTITLE}</h3>",
            title = PAGE_TITLE,
        );

        if let Outcome::Unavailable(message) = &self.outcome {
            let _ = write!(
                html,
                "<div class=\"status error\">{}</div></body></html>",
                escape_html(message)
            );
            return html;
        }

        self.render_preset_selector(&mut html);
        self.render_form(&mut html);

        match &self.outcome {
            Outcome::Classified(view) => render_result(&mut html, view),
            Outcome::Rejected(message) => {
                let _ = write!(
                    html,
                    "<div class=\"status error\">{}</div>",
                    escape_html(message)
                );
            }
            Outcome::Ready | Outcome::Unavailable(_) => {}
        }

        html.push_str("</body></html>");
        html
    }

    fn render_preset_selector(&self, html: &mut String) {
        html.push_str(
            "<form method=\"get\" action=\"/\"><label for=\"preset\">Load Known Kepler Data</label>\
             <select id=\"preset\" name=\"preset\" onchange=\"this.form.submit()\">",
        );
        for preset in PRESETS.iter() {
            let selected = if preset.id == self.preset.id {
                " selected"
            } else {
                ""
            };
            let _ = write!(
                html,
                "<option value=\"{}\"{}>{}</option>",
                escape_html(preset.id),
                selected,
                escape_html(preset.name)
            );
        }
        html.push_str("</select><noscript><button type=\"submit\">Load</button></noscript></form>");
    }

    fn render_form(&self, html: &mut String) {
        let _ = write!(
            html,
            "<form method=\"post\" action=\"/predict\">\
             <input type=\"hidden\" name=\"preset\" value=\"{}\"><div class=\"panels\">",
            escape_html(self.preset.id)
        );
        for (heading, range) in PANELS.iter() {
            let _ = write!(html, "<div class=\"panel\"><h4>{}</h4>", heading);
            for i in range.clone() {
                let _ = write!(
                    html,
                    "<label for=\"{col}\">{label}</label>\
                     <input id=\"{col}\" name=\"{col}\" type=\"number\" step=\"any\" value=\"{value}\">",
                    col = FEATURE_COLUMNS[i],
                    label = FIELD_LABELS[i],
                    value = escape_html(&self.values[i]),
                );
            }
            html.push_str("</div>");
        }
        let _ = write!(
            html,
            "</div><button type=\"submit\">{}</button></form>",
            SUBMIT_LABEL
        );
    }
}

fn render_result(html: &mut String, view: &PredictionView) {
    let class = if view.label == 1 { "success" } else { "error" };
    let _ = write!(
        html,
        "<h2>Analysis Results</h2>\
         <div class=\"metric\"><span>{PROBABILITY_LABEL}</span> <strong>{:.2}%</strong></div>\
         <div class=\"status {}\">STATUS: {}</div>\
         <div class=\"bar\" role=\"progressbar\" aria-valuenow=\"{:.4}\" aria-valuemin=\"0\" aria-valuemax=\"1\">\
         <div style=\"width:{:.2}%\"></div></div>",
        view.probability * 100.0,
        class,
        view.decision,
        view.confidence,
        view.confidence * 100.0,
    );
}

/// Feature values as form field strings.
pub fn format_values(features: &FeatureVector) -> [String; FEATURE_COUNT] {
    std::array::from_fn(|i| features[i].to_string())
}

/// Escape text for HTML element content and quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
