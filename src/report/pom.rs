use anyhow::Result;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::license::catalog::License;

/// Render the Maven POM `<licenses>` block declaring `license`.
///
/// ```xml
/// <licenses>
///   <license>
///     <name>Apache license 2.0</name>
///     <url>https://opensource.org/licenses/apache-2.0</url>
///   </license>
/// </licenses>
/// ```
pub fn render(license: License) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Start(BytesStart::new("licenses")))?;
    writer.write_event(Event::Start(BytesStart::new("license")))?;
    write_text_element(&mut writer, "name", license.name())?;
    write_text_element(&mut writer, "url", &license.url())?;
    writer.write_event(Event::End(BytesEnd::new("license")))?;
    writer.write_event(Event::End(BytesEnd::new("licenses")))?;

    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, tag: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}
