//! 2D canvas renderer
//!
//! Draws a `FrameView`; knows nothing about game rules.

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::hud::FrameView;

const SHIP_IMAGE: &str = "assets/spacecraft.png";
const SKY_TOP: &str = "#000033";
const SKY_BOTTOM: &str = "#000066";
const LETTER_FILL: &str = "#00ffff";
const LETTER_FONT: &str = "bold 24px Orbitron, sans-serif";

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    ship: Option<HtmlImageElement>,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        let ship = HtmlImageElement::new().ok();
        match &ship {
            Some(img) => img.set_src(SHIP_IMAGE),
            None => log::warn!("Could not create ship image, drawing a placeholder"),
        }
        Self { ctx, ship }
    }

    pub fn render(&self, view: &FrameView) {
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, FIELD_WIDTH as f64, FIELD_HEIGHT as f64);
        self.draw_background(view);
        self.draw_player(view);
        self.draw_letters(view);
    }

    fn draw_background(&self, view: &FrameView) {
        let ctx = &self.ctx;
        let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, FIELD_HEIGHT as f64);
        gradient.add_color_stop(0.0, SKY_TOP).ok();
        gradient.add_color_stop(1.0, SKY_BOTTOM).ok();
        ctx.set_fill_style_canvas_gradient(&gradient);
        ctx.fill_rect(0.0, 0.0, FIELD_WIDTH as f64, FIELD_HEIGHT as f64);

        ctx.set_fill_style_str("white");
        for star in view.stars {
            ctx.begin_path();
            ctx.arc(
                star.pos.x as f64,
                star.pos.y as f64,
                star.size as f64,
                0.0,
                std::f64::consts::TAU,
            )
            .ok();
            ctx.fill();
        }
    }

    fn draw_player(&self, view: &FrameView) {
        let ctx = &self.ctx;
        let r = view.player;
        let (x, y, w, h) = (r.min.x as f64, r.min.y as f64, r.size.x as f64, r.size.y as f64);

        if let Some(img) = self.ship.as_ref().filter(|i| i.complete() && i.natural_width() > 0) {
            ctx.draw_image_with_html_image_element_and_dw_and_dh(img, x, y, w, h).ok();
            return;
        }

        // Image not loaded yet: simple arrow-shaped ship
        ctx.set_fill_style_str("#cccccc");
        ctx.begin_path();
        ctx.move_to(x, y);
        ctx.line_to(x + w, y + h / 2.0);
        ctx.line_to(x, y + h);
        ctx.close_path();
        ctx.fill();
    }

    fn draw_letters(&self, view: &FrameView) {
        let ctx = &self.ctx;
        ctx.set_font(LETTER_FONT);
        ctx.set_text_baseline("top");
        ctx.set_fill_style_str(LETTER_FILL);
        ctx.set_stroke_style_str("#ffffff");
        ctx.set_line_width(1.0);

        let mut buf = [0u8; 4];
        for letter in &view.letters {
            let glyph = letter.glyph.encode_utf8(&mut buf);
            let (x, y) = (letter.rect.min.x as f64, letter.rect.min.y as f64);
            ctx.fill_text(glyph, x, y).ok();
            ctx.stroke_text(glyph, x, y).ok();
        }
    }
}

/// Fetch the 2D context of the game canvas
pub fn context_2d(
    canvas: &web_sys::HtmlCanvasElement,
) -> Result<CanvasRenderingContext2d, JsValue> {
    use wasm_bindgen::JsCast;
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| JsValue::from_str("not a 2d context"))
}
