use crate::cloud::Placement;
use anyhow::{Context, Result, bail};
use cloud_layouter::Size;
use csv::{ReaderBuilder, Trim, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

const EXPECTED_WIDTH_HEADER: &str = "Width";
const EXPECTED_HEIGHT_HEADER: &str = "Height";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SizeRecord {
    width: i32,
    height: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct PlacementRecord {
    index: usize,
    side: String,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl PlacementRecord {
    fn new(index: usize, placement: &Placement) -> Self {
        let rect = placement.rect;
        Self {
            index,
            side: placement.side.to_string(),
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        }
    }
}

/// Reads `Width,Height` rows
pub fn read_sizes<R: Read>(reader: R) -> Result<Vec<Size>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().context("reading CSV header")?.clone();
    let found: Vec<&str> = headers.iter().collect();
    if found.len() < 2
        || found[0] != EXPECTED_WIDTH_HEADER
        || found[1] != EXPECTED_HEIGHT_HEADER
    {
        bail!(
            "expected header '{},{}', got '{}'",
            EXPECTED_WIDTH_HEADER,
            EXPECTED_HEIGHT_HEADER,
            found.join(",")
        );
    }

    let mut sizes = Vec::new();
    for (i, record) in rdr.deserialize::<SizeRecord>().enumerate() {
        // header is line 1
        let record = record.with_context(|| format!("invalid size at line {}", i + 2))?;
        sizes.push(Size::new(record.width, record.height));
    }
    Ok(sizes)
}

pub fn write_csv<W: Write>(writer: W, placements: &[Placement]) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_writer(writer);
    for (index, placement) in placements.iter().enumerate() {
        wtr.serialize(PlacementRecord::new(index, placement))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(mut writer: W, placements: &[Placement]) -> Result<()> {
    let records: Vec<PlacementRecord> = placements
        .iter()
        .enumerate()
        .map(|(index, placement)| PlacementRecord::new(index, placement))
        .collect();
    serde_json::to_writer_pretty(&mut writer, &records)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
