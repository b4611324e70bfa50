//! draw.io schema diagram export
//!
//! Lays every table out as a draw.io table-shape container with one row
//! node per column, packed left-to-right on a fixed pitch and wrapped to
//! a new band once the row is full. Node ids are derived purely from
//! position in the (alphabetical table, declared column) ordering, so an
//! unchanged schema always gets identical ids and the whole document is
//! byte-stable.

use tracing::info;

use crate::database::{ColumnDescriptor, ConnectionManager, SchemaIntrospector};
use crate::error::Result;

/// First node id; 0 and 1 are reserved by the mxGraph root cells
const FIRST_CELL_ID: u32 = 2;

/// Table node width in diagram units
const TABLE_WIDTH: u32 = 220;
/// Table header height; column rows stack below it
const HEADER_HEIGHT: u32 = 30;
/// Height of one column row
const ROW_HEIGHT: u32 = 24;

/// Top-left corner of the first table
const ORIGIN_X: u32 = 80;
const ORIGIN_Y: u32 = 80;
/// Horizontal distance between table origins
const PITCH_X: u32 = 260;
/// Vertical distance between wrapped bands
const PITCH_Y: u32 = 280;
/// Wrap to a new band once x passes this threshold
const WRAP_X: u32 = 900;

const TABLE_STYLE: &str = "shape=table;startSize=30;container=1;collapsible=1;\
childLayout=tableLayout;fixedRows=1;rowLines=0;fontStyle=1;align=center;\
resizeLast=1;fontSize=13;";
const ROW_STYLE: &str = "shape=tableRow;startSize=0;swimlaneHead=0;swimlaneBody=0;\
fillColor=none;collapsible=0;dropTarget=0;points=[[0,0.5],[1,0.5]];\
portConstraint=eastwest;fontSize=11;";

/// Regenerates the schema diagram document
pub struct DiagramExporter<'a> {
    manager: &'a ConnectionManager,
}

impl<'a> DiagramExporter<'a> {
    pub fn new(manager: &'a ConnectionManager) -> Self {
        DiagramExporter { manager }
    }

    /// The draw.io document for the open database's schema
    ///
    /// An empty schema yields the bare document wrapper, which draw.io
    /// opens as an empty page.
    pub fn export_diagram(&self) -> Result<String> {
        let db = self.manager.current()?;
        let introspector = SchemaIntrospector::new(db);
        let tables = introspector.list_tables()?;

        let mut cells = String::new();
        let mut cell_id = FIRST_CELL_ID;
        let mut x = ORIGIN_X;
        let mut y = ORIGIN_Y;

        for table in &tables {
            let columns = introspector.describe_table(table)?;
            let height = HEADER_HEIGHT + ROW_HEIGHT * columns.len() as u32;
            let table_id = cell_id;
            cells.push_str(&format!(
                "        <mxCell id=\"{id}\" value=\"{name}\" style=\"{style}\" \
                 vertex=\"1\" parent=\"1\">\
                 <mxGeometry x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" as=\"geometry\"/>\
                 </mxCell>\n",
                id = table_id,
                name = xml_escape(table),
                style = TABLE_STYLE,
                x = x,
                y = y,
                w = TABLE_WIDTH,
                h = height,
            ));
            cell_id += 1;

            for (index, column) in columns.iter().enumerate() {
                let offset = HEADER_HEIGHT + ROW_HEIGHT * index as u32;
                cells.push_str(&format!(
                    "        <mxCell id=\"{id}\" value=\"{label}\" style=\"{style}\" \
                     vertex=\"1\" parent=\"{parent}\">\
                     <mxGeometry y=\"{offset}\" width=\"{w}\" height=\"{h}\" as=\"geometry\"/>\
                     </mxCell>\n",
                    id = cell_id,
                    label = xml_escape(&row_label(column)),
                    style = ROW_STYLE,
                    parent = table_id,
                    offset = offset,
                    w = TABLE_WIDTH,
                    h = ROW_HEIGHT,
                ));
                cell_id += 1;
            }

            x += PITCH_X;
            if x > WRAP_X {
                x = ORIGIN_X;
                y += PITCH_Y;
            }
        }

        info!(tables = tables.len(), cells = cell_id - FIRST_CELL_ID, "diagram generated");
        Ok(wrap_document(&cells))
    }
}

/// Row label: name, key marker, declared type with not-null marker
fn row_label(column: &ColumnDescriptor) -> String {
    let key = if column.primary_key { " \u{1f511}" } else { "" };
    let not_null = if column.not_null { " NN" } else { "" };
    format!(
        "{}{} [{}{}]",
        column.name, key, column.declared_type, not_null
    )
}

/// Fixed mxfile/mxGraphModel wrapper
///
/// The `modified` stamp is constant: the document must be a pure function
/// of the schema, and a wall-clock stamp would break byte-stability.
fn wrap_document(cells: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <mxfile host=\"sqlscope\" modified=\"2024-01-01T00:00:00.000Z\">\n\
         \x20\x20<diagram name=\"Schema\" id=\"schema\">\n\
         \x20\x20\x20\x20<mxGraphModel dx=\"1422\" dy=\"762\" grid=\"1\" gridSize=\"10\" \
         guides=\"1\" tooltips=\"1\" connect=\"1\" arrows=\"1\" fold=\"1\" page=\"1\" \
         pageScale=\"1\" pageWidth=\"1169\" pageHeight=\"827\" math=\"0\" shadow=\"0\">\n\
         \x20\x20\x20\x20\x20\x20<root>\n\
         \x20\x20\x20\x20\x20\x20\x20\x20<mxCell id=\"0\"/>\n\
         \x20\x20\x20\x20\x20\x20\x20\x20<mxCell id=\"1\" parent=\"0\"/>\n\
         {cells}\
         \x20\x20\x20\x20\x20\x20</root>\n\
         \x20\x20\x20\x20</mxGraphModel>\n\
         \x20\x20</diagram>\n\
         </mxfile>\n"
    )
}

/// Escape text for an XML attribute value
fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
