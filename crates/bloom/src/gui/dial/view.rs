use super::model::{ChildButton, Dial};
use super::{GLYPH_LENGTH, GLYPH_WIDTH, ICON_FILL, LABEL_FONT_SIZE};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::Srgba;
use petal::ButtonStyle;
use std::f64::consts::PI;

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

/// Draws a child in its own frame: origin at the button centre, rotated and
/// scaled by the interpolated style.
struct ChildRenderer<'a> {
    button: &'a ChildButton,
    style: &'a ButtonStyle,
}

impl<'a> ChildRenderer<'a> {
    fn new(button: &'a ChildButton, style: &'a ButtonStyle) -> Self {
        Self { button, style }
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let center = self.style.center();
        cr.save()?;
        cr.translate(center.x, center.y);
        cr.rotate(self.style.rotation.to_radians());
        cr.scale(self.style.scale, self.style.scale);

        set_color(cr, colors.child);
        cr.arc(0.0, 0.0, self.style.width / 2.0, 0.0, 2.0 * PI);
        cr.fill()?;

        match &self.button.pixbuf {
            Some(pixbuf) => self.draw_icon(cr, pixbuf)?,
            None => self.draw_label(cr, colors)?,
        }
        cr.restore()
    }

    fn draw_icon(&self, cr: &Context, pixbuf: &Pixbuf) -> Result<(), cairo::Error> {
        let icon_scale = (self.style.width * ICON_FILL) / pixbuf.width().max(1) as f64;
        let (iw, ih) = (
            pixbuf.width() as f64 * icon_scale,
            pixbuf.height() as f64 * icon_scale,
        );

        cr.save()?;
        cr.translate(-iw / 2.0, -ih / 2.0);
        cr.scale(icon_scale, icon_scale);
        cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
        cr.paint()?;
        cr.restore()
    }

    fn draw_label(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let text = self.button.icon.to_string();
        set_color(cr, colors.glyph);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(LABEL_FONT_SIZE);
        let ext = cr.text_extents(&text)?;
        cr.move_to(
            -(ext.width() / 2.0 + ext.x_bearing()),
            -(ext.height() / 2.0 + ext.y_bearing()),
        );
        cr.show_text(&text)
    }
}

/// The hub with a cross that reads as "+" when closed (-45) and "x" when
/// open (0).
fn draw_hub(cr: &Context, style: &ButtonStyle, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let center = style.center();
    set_color(cr, colors.hub);
    cr.arc(center.x, center.y, style.width / 2.0, 0.0, 2.0 * PI);
    cr.fill()?;

    let arm = style.width * GLYPH_LENGTH / 2.0;
    cr.save()?;
    cr.translate(center.x, center.y);
    cr.rotate((style.rotation + 45.0).to_radians());
    set_color(cr, colors.glyph);
    cr.set_line_width(GLYPH_WIDTH);
    cr.set_line_cap(cairo::LineCap::Round);
    cr.move_to(-arm, 0.0);
    cr.line_to(arm, 0.0);
    cr.move_to(0.0, -arm);
    cr.line_to(0.0, arm);
    cr.stroke()?;
    cr.restore()
}

/// Children first so that, collapsed, they sit underneath the hub.
pub fn draw(cr: &Context, dial: &Dial, colors: &ThemeColors) -> Result<(), cairo::Error> {
    for (button, style) in dial.children() {
        ChildRenderer::new(button, style).draw(cr, colors)?;
    }
    draw_hub(cr, &dial.hub_style(), colors)
}
