//! Corps XML des requêtes OSM (quick-xml)

use std::io::Cursor;

use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use crate::changes::FeatureTags;
use crate::osm::{ChangesetId, ChangesetMetadata};

/// `<osm><changeset><tag k v/>...</changeset></osm>`
pub fn changeset_body(metadata: &ChangesetMetadata) -> std::io::Result<String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    writer.write_event(Event::Start(BytesStart::new("osm")))?;
    writer.write_event(Event::Start(BytesStart::new("changeset")))?;
    write_tags(&mut writer, &metadata.tags())?;
    writer.write_event(Event::End(BytesEnd::new("changeset")))?;
    writer.write_event(Event::End(BytesEnd::new("osm")))?;

    into_string(writer)
}

/// `<osm><node changeset lat lon><tag k v/>...</node></osm>`
pub fn node_body(
    changeset: ChangesetId,
    latitude: f64,
    longitude: f64,
    tags: &FeatureTags,
) -> std::io::Result<String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    let changeset = changeset.to_string();
    let lat = latitude.to_string();
    let lon = longitude.to_string();
    let node = BytesStart::new("node").with_attributes([
        ("changeset", changeset.as_str()),
        ("lat", lat.as_str()),
        ("lon", lon.as_str()),
    ]);

    writer.write_event(Event::Start(BytesStart::new("osm")))?;
    writer.write_event(Event::Start(node))?;
    write_tags(&mut writer, tags)?;
    writer.write_event(Event::End(BytesEnd::new("node")))?;
    writer.write_event(Event::End(BytesEnd::new("osm")))?;

    into_string(writer)
}

fn write_tags(writer: &mut Writer<Cursor<Vec<u8>>>, tags: &FeatureTags) -> std::io::Result<()> {
    for (k, v) in tags {
        let tag = BytesStart::new("tag").with_attributes([("k", k.as_str()), ("v", v.as_str())]);
        writer.write_event(Event::Empty(tag))?;
    }
    Ok(())
}

fn into_string(writer: Writer<Cursor<Vec<u8>>>) -> std::io::Result<String> {
    String::from_utf8(writer.into_inner().into_inner())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}
