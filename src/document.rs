//! Apply a transformation to all geometry of an SVG document.

use std::fmt;
use std::str;

use log::trace;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};

use crate::error::{Error, Result};
use crate::{parse_coordinate, transform_path_string, CoordinatePair};

/// Attribute pairs that hold a single point.
const COORDINATE_ATTRIBUTES: [(&str, &str); 3] = [("x", "y"), ("x1", "y1"), ("x2", "y2")];

fn xml_error<E: fmt::Display>(e: E) -> Error {
    Error::Xml(e.to_string())
}

fn position(attributes: &[Attribute], name: &str) -> Option<usize> {
    attributes
        .iter()
        .position(|attr| attr.key == name.as_bytes())
}

fn attribute_value(attr: &Attribute) -> Result<String> {
    let value = attr.unescaped_value().map_err(xml_error)?;
    str::from_utf8(&value).map(str::to_string).map_err(xml_error)
}

/// Build a transformed copy of `element`, or return `None` if it carries no
/// geometry.
fn rewrite_element<F>(
    element: &BytesStart,
    transformation: &mut F,
) -> Result<Option<BytesStart<'static>>>
where
    F: FnMut(CoordinatePair) -> CoordinatePair,
{
    let attributes = element
        .attributes()
        .map(|attr| attr.map_err(xml_error))
        .collect::<Result<Vec<_>>>()?;
    let mut replacements: Vec<Option<String>> = vec![None; attributes.len()];

    if let Some(idx) = position(&attributes, "d") {
        let expr = attribute_value(&attributes[idx])?;
        trace!("rewrite_element: Path {:?}", expr);
        replacements[idx] = Some(transform_path_string(&expr, &mut *transformation)?);
    }

    for &(x_name, y_name) in &COORDINATE_ATTRIBUTES {
        if let (Some(x_idx), Some(y_idx)) =
            (position(&attributes, x_name), position(&attributes, y_name))
        {
            let x = parse_coordinate(x_name, &attribute_value(&attributes[x_idx])?)?;
            let y = parse_coordinate(y_name, &attribute_value(&attributes[y_idx])?)?;
            trace!("rewrite_element: Point {}={} {}={}", x_name, x, y_name, y);
            let point = transformation(CoordinatePair::new(x, y));
            replacements[x_idx] = Some(point.x.to_string());
            replacements[y_idx] = Some(point.y.to_string());
        }
    }

    if replacements.iter().all(Option::is_none) {
        return Ok(None);
    }

    let mut rewritten = BytesStart::owned_name(element.name().to_vec());
    for (attr, replacement) in attributes.into_iter().zip(replacements) {
        match replacement {
            Some(value) => rewritten.push_attribute((attr.key, value.as_bytes())),
            None => rewritten.push_attribute(attr),
        }
    }
    Ok(Some(rewritten))
}

/// Transform an SVG document given as string.
///
/// Every `d` attribute is transformed with [`transform_path_string`], and
/// every element that has both attributes of a coordinate pair (`x`/`y`,
/// `x1`/`y1`, `x2`/`y2`) gets that point transformed. Everything else is
/// written back unchanged. Elements are processed in document order.
pub fn transform_svg<F>(svg: &str, mut transformation: F) -> Result<String>
where
    F: FnMut(CoordinatePair) -> CoordinatePair,
{
    trace!("transform_svg");

    let mut reader = Reader::from_str(svg);
    reader.trim_text(false);
    let mut writer = Writer::new(Vec::new());

    let mut buf = Vec::new();
    let mut rewritten = 0;
    loop {
        let event = match reader.read_event(&mut buf) {
            Ok(Event::Start(e)) => match rewrite_element(&e, &mut transformation)? {
                Some(new) => {
                    rewritten += 1;
                    Event::Start(new)
                }
                None => Event::Start(e),
            },
            Ok(Event::Empty(e)) => match rewrite_element(&e, &mut transformation)? {
                Some(new) => {
                    rewritten += 1;
                    Event::Empty(new)
                }
                None => Event::Empty(e),
            },
            Ok(Event::Eof) => {
                trace!("transform_svg: EOF");
                break;
            }
            Ok(other) => other,
            Err(e) => return Err(Error::Xml(format!("Error when parsing XML: {}", e))),
        };
        writer.write_event(event).map_err(xml_error)?;

        buf.clear();
    }
    trace!("transform_svg: Rewrote {} elements", rewritten);

    String::from_utf8(writer.into_inner()).map_err(xml_error)
}

/// Read `width` and `height` of the root element. Unit suffixes such as
/// `px` or `mm` are dropped, only digits and the decimal point are kept.
pub fn svg_shape(svg: &str) -> Result<(f64, f64)> {
    trace!("svg_shape");

    let mut reader = Reader::from_str(svg);
    reader.trim_text(true);

    let mut buf = Vec::new();
    loop {
        match reader.read_event(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let attributes = e
                    .attributes()
                    .map(|attr| attr.map_err(xml_error))
                    .collect::<Result<Vec<_>>>()?;
                let dimension = |name: &str| -> Result<f64> {
                    let idx = position(&attributes, name)
                        .ok_or_else(|| Error::MissingAttribute(name.to_string()))?;
                    let raw = attribute_value(&attributes[idx])?;
                    let digits: String = raw
                        .chars()
                        .filter(|c| c.is_ascii_digit() || *c == '.')
                        .collect();
                    parse_coordinate(name, &digits).map_err(|_| Error::InvalidAttribute {
                        name: name.to_string(),
                        value: raw,
                    })
                };
                return Ok((dimension("width")?, dimension("height")?));
            }
            Ok(Event::Eof) => return Err(Error::Xml("No root element found".into())),
            Ok(_) => {}
            Err(e) => return Err(Error::Xml(format!("Error when parsing XML: {}", e))),
        }
        buf.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translate(pair: CoordinatePair) -> CoordinatePair {
        CoordinatePair::new(pair.x + 1.0, pair.y + 1.0)
    }

    #[test]
    fn test_transform_svg() {
        let _ = env_logger::try_init();
        let input = concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 5 5">"#,
            r#"<path class="icon" d="M2 1 H3 V2 Z"/>"#,
            r#"<rect x="1" y="2" width="3" height="4"/>"#,
            r#"<line x1="0" y1="0" x2="1" y2="1"></line>"#,
            r#"<text x="1">a &amp; b</text>"#,
            r#"</svg>"#,
        );
        let result = transform_svg(input, translate).unwrap();
        assert_eq!(
            result,
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 5 5">"#,
                r#"<path class="icon" d="M3 2L4 2L4 3Z"/>"#,
                r#"<rect x="2" y="3" width="3" height="4"/>"#,
                r#"<line x1="1" y1="1" x2="2" y2="2"></line>"#,
                r#"<text x="1">a &amp; b</text>"#,
                r#"</svg>"#,
            )
        );
    }

    #[test]
    fn test_transform_svg_keeps_layout() {
        let _ = env_logger::try_init();
        let input = r#"
            <svg xmlns="http://www.w3.org/2000/svg" version="1.1">
                <!-- a cross -->
                <g   id="group" >
                    <path d="M2 1 H3 V2 H4 V3 H3 V4 H2 V3 H1 V2 H2 Z" />
                </g>
            </svg>
        "#;
        let result = transform_svg(input, |p| p).unwrap();
        assert!(result.contains("<!-- a cross -->"));
        assert!(result.contains(r#"<g   id="group" >"#));
        assert!(result.contains(r#"<path d="M2 1L3 1L3 2L4 2L4 3L3 3L3 4L2 4L2 3L1 3L1 2L2 2Z"/>"#));
    }

    #[test]
    fn test_transform_svg_call_order() {
        let mut calls = Vec::new();
        let input = r#"<svg><circle x="5" y="6" d="M1 2"/><rect x2="7" y2="8" x1="3" y1="4"/></svg>"#;
        transform_svg(input, |p| {
            calls.push((p.x, p.y));
            p
        })
        .unwrap();
        assert_eq!(calls, vec![(1., 2.), (5., 6.), (3., 4.), (7., 8.)]);
    }

    #[test]
    fn test_transform_svg_escaped_path() {
        let input = r#"<path d="M1&#32;2"/>"#;
        let result = transform_svg(input, translate).unwrap();
        assert_eq!(result, r#"<path d="M2 3"/>"#);
    }

    #[test]
    fn test_transform_svg_unsupported_path() {
        let input = r#"<svg><path d="M0 0 A10 10 0 0 1 20 20"/></svg>"#;
        assert_eq!(
            transform_svg(input, translate),
            Err(Error::UnsupportedCommand('A'))
        );
    }

    #[test]
    fn test_transform_svg_invalid_coordinate() {
        let input = r#"<svg><rect x="10%" y="2"/></svg>"#;
        assert_eq!(
            transform_svg(input, translate),
            Err(Error::InvalidAttribute {
                name: "x".to_string(),
                value: "10%".to_string()
            })
        );
    }

    #[test]
    fn test_transform_svg_malformed() {
        let _ = env_logger::try_init();
        let input = r#"
            <svg xmlns="http://www.w3.org/2000/svg" version="1.1">
                <path d="M 20,30"/>
            </baa>
        "#;
        let result = transform_svg(input, translate);
        assert!(matches!(result, Err(Error::Xml(_))));
    }

    #[test]
    fn test_svg_shape() {
        let _ = env_logger::try_init();
        let input = r#"
            <?xml version="1.0" encoding="UTF-8" standalone="no"?>
            <svg xmlns="http://www.w3.org/2000/svg" width="210mm" height="297.5px">
                <rect x="1" y="2" width="3" height="4"/>
            </svg>
        "#;
        assert_eq!(svg_shape(input).unwrap(), (210.0, 297.5));
    }

    #[test]
    fn test_svg_shape_missing_or_invalid() {
        assert_eq!(
            svg_shape(r#"<svg width="10"><rect width="3" height="4"/></svg>"#),
            Err(Error::MissingAttribute("height".to_string()))
        );
        assert_eq!(
            svg_shape(r#"<svg width="auto" height="10"/>"#),
            Err(Error::InvalidAttribute {
                name: "width".to_string(),
                value: "auto".to_string()
            })
        );
        assert!(matches!(svg_shape(""), Err(Error::Xml(_))));
    }
}
