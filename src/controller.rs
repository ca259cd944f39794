//! DOM side of the pan/zoom interaction: binds a `Viewport` to one `<svg>`
//! element, forwards mouse and wheel events to it and writes back the
//! `viewBox` attribute and the cursor style.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, MouseEvent, SvgElement, WheelEvent};

use crate::config::{CONFIG_ATTRIBUTE, ViewportConfig};
use crate::error::{ViewportError, describe_js};
use crate::model::{Point, Size, Viewbox};
use crate::state::Viewport;

const CURSOR_IDLE: &str = "grab";
const CURSOR_PANNING: &str = "grabbing";

pub struct ViewportController {
    svg: SvgElement,
    viewport: Rc<RefCell<Viewport>>,
    mousedown_cb: Closure<dyn FnMut(MouseEvent)>,
    mousemove_cb: Closure<dyn FnMut(MouseEvent)>,
    mouseup_cb: Closure<dyn FnMut(MouseEvent)>,
    mouseleave_cb: Closure<dyn FnMut(MouseEvent)>,
    wheel_cb: Closure<dyn FnMut(WheelEvent)>,
}

impl ViewportController {
    /// Parse the element's geometry and config, then start listening.
    /// Nothing is registered when this returns an error.
    pub fn attach(element: Element) -> Result<Self, ViewportError> {
        let svg: SvgElement = element.dyn_into().map_err(|_| ViewportError::NotSvg)?;
        let raw = svg
            .get_attribute("viewBox")
            .ok_or(ViewportError::MissingViewBox)?;
        let viewbox: Viewbox = raw.parse()?;
        let config = ViewportConfig::from_attribute(svg.get_attribute(CONFIG_ATTRIBUTE).as_deref())?;
        let viewport = Rc::new(RefCell::new(Viewport::new(viewbox, &config)));

        svg.style().set_property("cursor", CURSOR_IDLE)?;

        let mousedown_cb = {
            let svg = svg.clone();
            let viewport = viewport.clone();
            Closure::wrap(Box::new(move |e: MouseEvent| {
                viewport.borrow_mut().begin_pan(client_pos(&e));
                set_cursor(&svg, CURSOR_PANNING);
            }) as Box<dyn FnMut(_)>)
        };
        let mousemove_cb = {
            let svg = svg.clone();
            let viewport = viewport.clone();
            Closure::wrap(Box::new(move |e: MouseEvent| {
                if !viewport.borrow().is_panning() {
                    return;
                }
                let moved = viewport
                    .borrow_mut()
                    .continue_pan(client_pos(&e), rendered_size(&svg));
                if let Some(vb) = moved {
                    write_viewbox(&svg, &vb);
                }
            }) as Box<dyn FnMut(_)>)
        };
        let mouseup_cb = end_pan_closure(&svg, &viewport);
        let mouseleave_cb = end_pan_closure(&svg, &viewport);
        let wheel_cb = {
            let svg = svg.clone();
            let viewport = viewport.clone();
            Closure::wrap(Box::new(move |e: WheelEvent| {
                e.prevent_default();
                let offset = pointer_offset(&svg, &e);
                let zoomed = viewport
                    .borrow_mut()
                    .zoom(e.delta_y(), offset, rendered_size(&svg));
                if let Some(vb) = zoomed {
                    write_viewbox(&svg, &vb);
                }
            }) as Box<dyn FnMut(_)>)
        };

        let controller = Self {
            svg,
            viewport,
            mousedown_cb,
            mousemove_cb,
            mouseup_cb,
            mouseleave_cb,
            wheel_cb,
        };
        controller.listen()?;
        log::info!("viewport bound, viewBox=\"{viewbox}\", zoomStep={}", config.zoom_step);
        Ok(controller)
    }

    pub fn viewbox(&self) -> Viewbox {
        self.viewport.borrow().viewbox()
    }

    fn listen(&self) -> Result<(), ViewportError> {
        for (event, cb) in self.listeners() {
            if let Err(err) = self.svg.add_event_listener_with_callback(event, cb) {
                self.unlisten();
                return Err(err.into());
            }
        }
        Ok(())
    }

    fn unlisten(&self) {
        for (event, cb) in self.listeners() {
            if let Err(err) = self.svg.remove_event_listener_with_callback(event, cb) {
                log::warn!("failed to remove {event} listener: {}", describe_js(&err));
            }
        }
    }

    fn listeners(&self) -> [(&'static str, &js_sys::Function); 5] {
        [
            ("mousedown", self.mousedown_cb.as_ref().unchecked_ref()),
            ("mousemove", self.mousemove_cb.as_ref().unchecked_ref()),
            ("mouseup", self.mouseup_cb.as_ref().unchecked_ref()),
            ("mouseleave", self.mouseleave_cb.as_ref().unchecked_ref()),
            ("wheel", self.wheel_cb.as_ref().unchecked_ref()),
        ]
    }
}

impl Drop for ViewportController {
    fn drop(&mut self) {
        self.unlisten();
        log::debug!("viewport unbound at viewBox=\"{}\"", self.viewbox());
    }
}

fn end_pan_closure(
    svg: &SvgElement,
    viewport: &Rc<RefCell<Viewport>>,
) -> Closure<dyn FnMut(MouseEvent)> {
    let svg = svg.clone();
    let viewport = viewport.clone();
    Closure::wrap(Box::new(move |_e: MouseEvent| {
        viewport.borrow_mut().end_pan();
        set_cursor(&svg, CURSOR_IDLE);
    }) as Box<dyn FnMut(_)>)
}

fn client_pos(e: &MouseEvent) -> Point {
    Point::new(e.client_x() as f64, e.client_y() as f64)
}

/// Pointer position relative to the element's content box. The event target is
/// usually a child shape, so `offsetX`/`offsetY` are not used.
fn pointer_offset(svg: &SvgElement, e: &MouseEvent) -> Point {
    let rect = svg.get_bounding_client_rect();
    Point::new(
        e.client_x() as f64 - rect.left() - svg.client_left() as f64,
        e.client_y() as f64 - rect.top() - svg.client_top() as f64,
    )
}

fn rendered_size(svg: &SvgElement) -> Size {
    Size::new(svg.client_width() as f64, svg.client_height() as f64)
}

fn write_viewbox(svg: &SvgElement, vb: &Viewbox) {
    if let Err(err) = svg.set_attribute("viewBox", &vb.to_string()) {
        log::warn!("failed to write viewBox: {}", describe_js(&err));
    }
}

fn set_cursor(svg: &SvgElement, cursor: &str) {
    if let Err(err) = svg.style().set_property("cursor", cursor) {
        log::warn!("failed to set cursor: {}", describe_js(&err));
    }
}
