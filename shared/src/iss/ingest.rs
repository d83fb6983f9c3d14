use crate::iss::error::{DocumentError, IngestError};
use crate::iss::model::{Datasets, PositionRecord, SightingRecord, Vector3};
use quick_xml::Reader;
use quick_xml::events::Event;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

const POSITIONS_ROOT: &str = "ndm";
const SIGHTINGS_ROOT: &str = "visible_passes";

// CCSDS OEM layout: ndm/oem/body/segment/data/stateVector*
#[derive(Debug, Deserialize)]
struct NdmDocument {
    oem: OemDocument,
}

#[derive(Debug, Deserialize)]
struct OemDocument {
    body: OemBody,
}

#[derive(Debug, Deserialize)]
struct OemBody {
    segment: OemSegment,
}

#[derive(Debug, Deserialize)]
struct OemSegment {
    data: OemData,
}

#[derive(Debug, Deserialize)]
struct OemData {
    #[serde(rename = "stateVector", default)]
    state_vectors: Vec<StateVector>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct StateVector {
    epoch: String,
    x: Measurement,
    y: Measurement,
    z: Measurement,
    x_dot: Measurement,
    y_dot: Measurement,
    z_dot: Measurement,
}

/// `<X units="km">-4567.8</X>`; the unit attribute is fixed by the format and ignored.
#[derive(Debug, Deserialize)]
struct Measurement {
    #[serde(rename = "$text")]
    value: f64,
}

impl Measurement {
    fn finite(&self, epoch: &str, component: &'static str) -> Result<f64, DocumentError> {
        if self.value.is_finite() {
            Ok(self.value)
        } else {
            Err(DocumentError::NonFinite {
                epoch: epoch.to_string(),
                component,
            })
        }
    }
}

impl TryFrom<StateVector> for PositionRecord {
    type Error = DocumentError;

    fn try_from(v: StateVector) -> Result<Self, Self::Error> {
        let epoch = v.epoch.as_str();
        let position = Vector3 {
            x: v.x.finite(epoch, "X")?,
            y: v.y.finite(epoch, "Y")?,
            z: v.z.finite(epoch, "Z")?,
        };
        let velocity = Vector3 {
            x: v.x_dot.finite(epoch, "X_DOT")?,
            y: v.y_dot.finite(epoch, "Y_DOT")?,
            z: v.z_dot.finite(epoch, "Z_DOT")?,
        };
        Ok(Self {
            epoch: v.epoch,
            position,
            velocity,
        })
    }
}

#[derive(Debug, Deserialize)]
struct VisiblePasses {
    #[serde(rename = "visible_pass", default)]
    passes: Vec<VisiblePass>,
}

#[derive(Debug, Deserialize)]
struct VisiblePass {
    country: String,
    region: String,
    city: String,
    spacecraft: String,
    sighting_date: String,
    duration_minutes: String,
    max_elevation: String,
    enters: String,
    exits: String,
    utc_offset: String,
    utc_time: String,
    utc_date: String,
}

impl From<VisiblePass> for SightingRecord {
    fn from(p: VisiblePass) -> Self {
        Self {
            country: p.country,
            region: p.region,
            city: p.city,
            spacecraft: p.spacecraft,
            sighting_date: p.sighting_date,
            duration_minutes: p.duration_minutes,
            max_elevation: p.max_elevation,
            enters: p.enters,
            exits: p.exits,
            utc_offset: p.utc_offset,
            utc_time: p.utc_time,
            utc_date: p.utc_date,
        }
    }
}

/// Name of the first element in the document. The serde deserializer does not look at
/// the root tag, so it is checked separately.
fn root_element(xml: &str) -> Result<String, DocumentError> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => {
                return Ok(String::from_utf8_lossy(e.name().as_ref()).into_owned());
            }
            Event::Eof => return Err(DocumentError::Empty),
            _ => {}
        }
    }
}

fn expect_root(xml: &str, expected: &'static str) -> Result<(), DocumentError> {
    let found = root_element(xml)?;
    if found != expected {
        return Err(DocumentError::UnexpectedRoot { expected, found });
    }
    Ok(())
}

pub fn parse_positions(xml: &str) -> Result<Vec<PositionRecord>, DocumentError> {
    expect_root(xml, POSITIONS_ROOT)?;
    let document: NdmDocument = quick_xml::de::from_str(xml)?;
    document
        .oem
        .body
        .segment
        .data
        .state_vectors
        .into_iter()
        .map(PositionRecord::try_from)
        .collect()
}

pub fn parse_sightings(xml: &str) -> Result<Vec<SightingRecord>, DocumentError> {
    expect_root(xml, SIGHTINGS_ROOT)?;
    let document: VisiblePasses = quick_xml::de::from_str(xml)?;
    Ok(document
        .passes
        .into_iter()
        .map(SightingRecord::from)
        .collect())
}

async fn read_document(path: &Path) -> Result<String, IngestError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| IngestError::Io {
            path: path.to_path_buf(),
            source,
        })
}

fn document_error(path: PathBuf) -> impl FnOnce(DocumentError) -> IngestError {
    move |source| IngestError::Document { path, source }
}

/// Reads and parses both documents into one complete generation. Nothing is returned
/// unless both files parse.
#[instrument(skip_all, fields(positions = %positions_path.display(), sightings = %sightings_path.display()))]
pub async fn load_datasets(
    positions_path: &Path,
    sightings_path: &Path,
) -> Result<Datasets, IngestError> {
    let positions_xml = read_document(positions_path).await?;
    let sightings_xml = read_document(sightings_path).await?;
    let positions_path = positions_path.to_path_buf();
    let sightings_path = sightings_path.to_path_buf();

    tokio::task::spawn_blocking(move || {
        let positions = parse_positions(&positions_xml).map_err(document_error(positions_path))?;
        let sightings = parse_sightings(&sightings_xml).map_err(document_error(sightings_path))?;
        debug!(
            epochs = positions.len(),
            sightings = sightings.len(),
            "parsed source documents"
        );
        Ok(Datasets::new(positions, sightings))
    })
    .await?
}

#[cfg(test)]
mod tests {
    use super::*;

    const OEM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ndm>
  <oem id="CCSDS_OEM_VERS" version="2.0">
    <header>
      <CREATION_DATE>2022-042T21:05:52.167Z</CREATION_DATE>
      <ORIGINATOR>JSC</ORIGINATOR>
    </header>
    <body>
      <segment>
        <metadata>
          <OBJECT_NAME>ISS</OBJECT_NAME>
          <CENTER_NAME>EARTH</CENTER_NAME>
        </metadata>
        <data>
          <COMMENT>Units are in kg and m^2</COMMENT>
          <stateVector>
            <EPOCH>2022-042T12:00:00.000Z</EPOCH>
            <X units="km">-5097.51711371908</X>
            <Y units="km">1610.3904623044801</Y>
            <Z units="km">-4217.077793733649</Z>
            <X_DOT units="km/s">-4.5815461024513304</X_DOT>
            <Y_DOT units="km/s">-2.8707426069239805</Y_DOT>
            <Z_DOT units="km/s">4.4462057434268503</Z_DOT>
          </stateVector>
          <stateVector>
            <EPOCH>2022-042T12:04:00.000Z</EPOCH>
            <X units="km">-5998.4652356788196</X>
            <Y units="km">391.26194859011099</Y>
            <Z units="km">-3164.5257382488</Z>
            <X_DOT units="km/s">-2.8799691318087701</X_DOT>
            <Y_DOT units="km/s">-3.1495993355232599</Y_DOT>
            <Z_DOT units="km/s">5.9997976728488604</Z_DOT>
          </stateVector>
        </data>
      </segment>
    </body>
  </oem>
</ndm>
"#;

    const PASSES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<visible_passes>
  <visible_pass>
    <country>Algeria</country>
    <region>None</region>
    <city>Adrar</city>
    <spacecraft>ISS</spacecraft>
    <sighting_date>Thu Feb 17/06:03 AM</sighting_date>
    <duration_minutes>1</duration_minutes>
    <max_elevation>13</max_elevation>
    <enters>10 above N</enters>
    <exits>13 above NNE</exits>
    <utc_offset>1.0</utc_offset>
    <utc_time>05:03</utc_time>
    <utc_date>Feb 17, 2022</utc_date>
  </visible_pass>
</visible_passes>
"#;

    #[test]
    fn parses_state_vectors_in_file_order() {
        let records = parse_positions(OEM).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].epoch, "2022-042T12:00:00.000Z");
        assert_eq!(records[1].epoch, "2022-042T12:04:00.000Z");
        assert_eq!(records[0].position.x, -5097.51711371908);
        assert_eq!(records[0].velocity.z, 4.4462057434268503);
    }

    #[test]
    fn parses_single_visible_pass() {
        let records = parse_sightings(PASSES).unwrap();
        assert_eq!(records.len(), 1);
        let pass = &records[0];
        assert_eq!(pass.country, "Algeria");
        assert_eq!(pass.region, "None");
        assert_eq!(pass.city, "Adrar");
        assert_eq!(pass.enters, "10 above N");
        assert_eq!(pass.utc_date, "Feb 17, 2022");
    }

    #[test]
    fn empty_pass_list_is_an_empty_dataset() {
        let records = parse_sightings("<visible_passes></visible_passes>").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn wrong_root_is_rejected() {
        let err = parse_positions(PASSES).unwrap_err();
        assert!(matches!(
            err,
            DocumentError::UnexpectedRoot { expected: "ndm", ref found } if found == "visible_passes"
        ));
    }

    #[test]
    fn missing_intermediate_element_is_rejected() {
        let err = parse_positions("<ndm><oem><header/></oem></ndm>").unwrap_err();
        assert!(matches!(err, DocumentError::Deserialize(_)));
    }

    #[test]
    fn missing_sighting_field_is_rejected() {
        let xml = "<visible_passes><visible_pass><country>US</country></visible_pass></visible_passes>";
        assert!(matches!(
            parse_sightings(xml),
            Err(DocumentError::Deserialize(_))
        ));
    }

    #[test]
    fn non_numeric_component_is_rejected() {
        let xml = OEM.replace("-5097.51711371908", "not-a-number");
        assert!(parse_positions(&xml).is_err());
    }

    #[test]
    fn non_finite_component_is_rejected() {
        let xml = OEM.replace("-2.8707426069239805", "NaN");
        let err = parse_positions(&xml).unwrap_err();
        assert!(matches!(
            err,
            DocumentError::NonFinite { ref epoch, component: "Y_DOT" } if epoch == "2022-042T12:00:00.000Z"
        ));

        let xml = OEM.replace("-5998.4652356788196", "inf");
        assert!(matches!(
            parse_positions(&xml),
            Err(DocumentError::NonFinite { component: "X", .. })
        ));
    }

    #[test]
    fn document_without_elements_is_empty() {
        assert!(matches!(parse_sightings(""), Err(DocumentError::Empty)));
    }
}
