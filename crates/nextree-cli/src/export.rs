//! Flat-file export: TSV edge tables and a GraphML rendering of the tree.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use nextree_analysis::TreeEdge;
use nextree_tree::Tree;

const EDGE_COLUMNS: [&str; 10] = [
    "parent_strain",
    "strain",
    "parent_country",
    "country",
    "date",
    "date_lower",
    "date_upper",
    "div",
    "country_entropy",
    "dist",
];

const ENRICHMENT_COLUMNS: [&str; 3] = ["desc_count", "total_proportion", "country_proportion"];

/// Write an edge list as a tab-separated table with a header row.
///
/// `enriched` appends the three proportion columns; the international
/// table is written once, after enrichment, with the full superset.
/// Missing values serialize as empty cells.
pub fn write_edges_tsv(path: &Path, edges: &[TreeEdge], enriched: bool) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating edge table `{}`", path.display()))?;
    let mut out = BufWriter::new(file);

    let mut header: Vec<&str> = EDGE_COLUMNS.to_vec();
    if enriched {
        header.extend(ENRICHMENT_COLUMNS);
    }
    writeln!(out, "{}", header.join("\t"))?;

    for edge in edges {
        let mut cells = vec![
            edge.parent_strain.clone(),
            edge.strain.clone(),
            opt_label(&edge.parent_country),
            opt_label(&edge.country),
            opt_number(edge.date),
            opt_number(edge.date_lower),
            opt_number(edge.date_upper),
            opt_number(edge.div),
            opt_number(edge.country_entropy),
            edge.branch_length.to_string(),
        ];
        if enriched {
            cells.push(edge.desc_count.map(|c| c.to_string()).unwrap_or_default());
            cells.push(opt_number(edge.total_proportion));
            cells.push(opt_number(edge.country_proportion));
        }
        writeln!(out, "{}", cells.join("\t"))?;
    }
    out.flush()
        .with_context(|| format!("writing edge table `{}`", path.display()))?;
    tracing::info!(path = %path.display(), rows = edges.len(), "wrote edge table");
    Ok(())
}

fn opt_label(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn opt_number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Write the tree topology as GraphML: one `<node>` per tree node (name as
/// a string label), one directed `<edge>` per parent→child branch (branch
/// length as weight). No epidemiological attributes are attached; this
/// path operates on the tree alone.
pub fn write_graphml(path: &Path, tree: &Tree) -> Result<()> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut graphml = BytesStart::new("graphml");
    graphml.push_attribute(("xmlns", "http://graphml.graphdrawing.org/xmlns"));
    writer.write_event(Event::Start(graphml))?;

    write_key(&mut writer, "d0", "node", "label", "string")?;
    write_key(&mut writer, "d1", "edge", "weight", "double")?;

    let mut graph = BytesStart::new("graph");
    graph.push_attribute(("id", "G"));
    graph.push_attribute(("edgedefault", "directed"));
    writer.write_event(Event::Start(graph))?;

    for id in tree.preorder() {
        let mut node = BytesStart::new("node");
        node.push_attribute(("id", format!("n{}", id.index()).as_str()));
        writer.write_event(Event::Start(node))?;
        write_data(&mut writer, "d0", tree.name(id))?;
        writer.write_event(Event::End(BytesEnd::new("node")))?;
    }

    for id in tree.preorder() {
        let Some(parent) = tree.parent(id) else {
            continue;
        };
        let mut edge = BytesStart::new("edge");
        edge.push_attribute(("source", format!("n{}", parent.index()).as_str()));
        edge.push_attribute(("target", format!("n{}", id.index()).as_str()));
        writer.write_event(Event::Start(edge))?;
        write_data(&mut writer, "d1", &tree.dist(id).to_string())?;
        writer.write_event(Event::End(BytesEnd::new("edge")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("graph")))?;
    writer.write_event(Event::End(BytesEnd::new("graphml")))?;

    fs::write(path, writer.into_inner())
        .with_context(|| format!("writing graphml `{}`", path.display()))?;
    tracing::info!(path = %path.display(), nodes = tree.len(), "wrote graphml");
    Ok(())
}

fn write_key(
    writer: &mut Writer<Vec<u8>>,
    id: &str,
    target: &str,
    attr_name: &str,
    attr_type: &str,
) -> Result<()> {
    let mut key = BytesStart::new("key");
    key.push_attribute(("id", id));
    key.push_attribute(("for", target));
    key.push_attribute(("attr.name", attr_name));
    key.push_attribute(("attr.type", attr_type));
    writer.write_event(Event::Empty(key))?;
    Ok(())
}

fn write_data(writer: &mut Writer<Vec<u8>>, key: &str, value: &str) -> Result<()> {
    let mut data = BytesStart::new("data");
    data.push_attribute(("key", key));
    writer.write_event(Event::Start(data))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new("data")))?;
    Ok(())
}
