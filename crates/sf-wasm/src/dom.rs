//! DOM binding: required elements and the counter outputs.

use sf_core::{CounterSink, Counters};
use sf_engine::ControlAction;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

/// Element that receives the canvas.
pub const CANVAS_CONTAINER_SELECTOR: &str = ".canvas";
/// Text output for the live shape count.
pub const SHAPE_COUNT_ID: &str = "nr-shapes";
/// Text output for the total area.
pub const AREA_ID: &str = "area-shapes";

/// Every element the page must provide, looked up once at start-up.
pub struct DomBinding {
    pub container: Element,
    pub buttons: Vec<(ControlAction, Element)>,
    pub shapes_out: Element,
    pub area_out: Element,
}

impl DomBinding {
    /// Look up every required element. Fails on the first one missing.
    pub fn bind(document: &Document, container_selector: &str) -> Result<Self, JsValue> {
        let container = document
            .query_selector(container_selector)?
            .ok_or_else(|| missing(container_selector))?;

        let buttons = ControlAction::ALL
            .into_iter()
            .map(|action| required_by_id(document, action.element_id()).map(|el| (action, el)))
            .collect::<Result<Vec<_>, JsValue>>()?;

        Ok(Self {
            container,
            buttons,
            shapes_out: required_by_id(document, SHAPE_COUNT_ID)?,
            area_out: required_by_id(document, AREA_ID)?,
        })
    }

    pub fn counters(&self) -> DomCounters {
        DomCounters {
            shapes_out: self.shapes_out.clone(),
            area_out: self.area_out.clone(),
        }
    }
}

fn required_by_id(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| missing(&format!("#{id}")))
}

fn missing(what: &str) -> JsValue {
    JsValue::from_str(&format!("Shapefall: required element {what} not found"))
}

/// Writes counters into the two text outputs.
pub struct DomCounters {
    shapes_out: Element,
    area_out: Element,
}

impl CounterSink for DomCounters {
    fn update(&mut self, counters: Counters) {
        let (shapes, area) = counter_texts(counters);
        self.shapes_out.set_text_content(Some(&shapes));
        self.area_out.set_text_content(Some(&area));
    }
}

/// Display strings for the shape count and total area.
pub fn counter_texts(counters: Counters) -> (String, String) {
    (counters.shapes.to_string(), counters.area.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn counters_render_as_plain_integers() {
        assert_eq!(
            counter_texts(Counters {
                shapes: 5,
                area: 10_613
            }),
            ("5".to_string(), "10613".to_string())
        );
        assert_eq!(
            counter_texts(Counters::default()),
            ("0".to_string(), "0".to_string())
        );
    }
}
