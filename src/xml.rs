//! Serialization of a fact collection into the `fdo_objects` document.
//!
//! ```text
//! <fdo_objects>
//!   <document url="..." date="">
//!     <facts>
//!       <Fact FactID="1" LeadID="1">
//!         <Department val="..."/>
//!       </Fact>
//!     </facts>
//!   </document>
//! </fdo_objects>
//! ```

use std::borrow::Cow;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use crate::error::Result;
use crate::facts::FactCollection;

const ROOT: &str = "fdo_objects";
const DOCUMENT: &str = "document";
const FACTS: &str = "facts";
const FACT: &str = "Fact";

/// Whether `c` is allowed anywhere in an XML 1.0 document.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

/// `s` with every character XML 1.0 forbids replaced by U+FFFD. Markup
/// characters are left for the writer to escape.
fn xml_text(s: &str) -> Cow<'_, str> {
    if s.chars().all(is_xml_char) {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(
            s.chars()
                .map(|c| if is_xml_char(c) { c } else { char::REPLACEMENT_CHARACTER })
                .collect(),
        )
    }
}

/// Render `facts` as an indented UTF-8 document for source `url`.
pub fn to_xml(facts: &FactCollection, url: &str) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new(ROOT)))?;

    let mut document = BytesStart::new(DOCUMENT);
    document.push_attribute(("url", xml_text(url).as_ref()));
    document.push_attribute(("date", ""));
    writer.write_event(Event::Start(document))?;

    if facts.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new(FACTS)))?;
    } else {
        writer.write_event(Event::Start(BytesStart::new(FACTS)))?;
        for fact in facts {
            let id = fact.id.to_string();
            let mut element = BytesStart::new(FACT);
            element.push_attribute(("FactID", id.as_str()));
            element.push_attribute(("LeadID", id.as_str()));
            writer.write_event(Event::Start(element))?;
            for attribute in &fact.attributes {
                let mut field = BytesStart::new(attribute.kind.as_str());
                field.push_attribute(("val", xml_text(&attribute.value).as_ref()));
                writer.write_event(Event::Empty(field))?;
            }
            writer.write_event(Event::End(BytesEnd::new(FACT)))?;
        }
        writer.write_event(Event::End(BytesEnd::new(FACTS)))?;
    }

    writer.write_event(Event::End(BytesEnd::new(DOCUMENT)))?;
    writer.write_event(Event::End(BytesEnd::new(ROOT)))?;
    Ok(String::from_utf8(writer.into_inner())?)
}
