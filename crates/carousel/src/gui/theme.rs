use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub background: Srgba<f64>,
    pub edge: Srgba<f64>,
    pub placeholder: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            background: Self::lookup_color(
                context,
                "carousel_bg_color",
                Srgba::new(0.078, 0.078, 0.078, 1.0),
                None,
            ),
            edge: Self::lookup_color(
                context,
                "carousel_edge_color",
                Srgba::new(0.706, 0.706, 0.706, 1.0),
                Some(1.0),
            ),
            placeholder: Self::lookup_color(
                context,
                "theme_unfocused_fg_color",
                Srgba::new(0.6, 0.6, 0.6, 0.8),
                Some(0.8),
            ),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
@define-color carousel_bg_color #141414;
@define-color carousel_edge_color #b4b4b4;

.carousel-window {
    background-color: @carousel_bg_color;
}

.carousel-drawing-area {
    background: none;
}

.slider-btn {
    min-width: 12px;
    min-height: 12px;
    border-radius: 9999px;
    padding: 0;
    background: alpha(white, 0.2);
    transition: background 200ms ease-out, transform 120ms ease-out;
}

.slider-btn.active {
    background: alpha(white, 0.9);
}

.slider-btn.fast-click {
    transform: scale(0.85);
}

.slide-caption {
    color: alpha(white, 0.85);
    font-weight: bold;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
