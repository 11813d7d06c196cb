//! Illustrative chart figures for planning dashboards.
//!
//! Figures serialize to the plotly JSON figure shape (`data` + `layout`) so a
//! front end can render them directly. The numbers are random placeholders,
//! not the output of any simulation.

use rand::Rng;
use serde::Serialize;

/// Buildings generated per square kilometre of land
pub const BUILDINGS_PER_SQ_KM: f64 = 10.0;

/// A renderable figure
#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Scatter3d {
        x: Vec<f64>,
        y: Vec<f64>,
        z: Vec<u32>,
        mode: String,
        marker: Marker,
    },
    Scatter {
        x: Vec<u32>,
        y: Vec<u32>,
        mode: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct Marker {
    pub size: u32,
    pub color: Vec<u32>,
    pub colorscale: String,
    pub opacity: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene: Option<Scene>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Axis {
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Scene {
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub zaxis: Axis,
    pub aspectmode: String,
    pub aspectratio: AspectRatio,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct AspectRatio {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Build a 3D scatter of randomly placed buildings over the land area
pub fn city_model(land_area: f64, zoning: &str, existing_infrastructure: &str) -> Figure {
    city_model_with_rng(land_area, zoning, existing_infrastructure, &mut rand::thread_rng())
}

/// Same as [`city_model`] with a caller-supplied random source
pub fn city_model_with_rng<R: Rng + ?Sized>(
    land_area: f64,
    zoning: &str,
    _existing_infrastructure: &str,
    rng: &mut R,
) -> Figure {
    // Negative and NaN areas saturate to zero buildings
    let num_buildings = (land_area * BUILDINGS_PER_SQ_KM) as usize;
    let side = land_area.max(0.0).sqrt();

    let heights: Vec<u32> = (0..num_buildings).map(|_| rng.gen_range(10..100)).collect();
    let x: Vec<f64> = (0..num_buildings).map(|_| rng.gen::<f64>() * side).collect();
    let y: Vec<f64> = (0..num_buildings).map(|_| rng.gen::<f64>() * side).collect();

    let trace = Trace::Scatter3d {
        x,
        y,
        z: heights.clone(),
        mode: "markers".to_string(),
        marker: Marker {
            size: 5,
            color: heights,
            colorscale: "Viridis".to_string(),
            opacity: 0.8,
        },
    };

    let layout = Layout {
        title: format!("3D City Model - {} Zone", zoning),
        scene: Some(Scene {
            xaxis: Axis { title: "X (km)".to_string() },
            yaxis: Axis { title: "Y (km)".to_string() },
            zaxis: Axis { title: "Height (m)".to_string() },
            aspectmode: "manual".to_string(),
            aspectratio: AspectRatio { x: 1.0, y: 1.0, z: 0.5 },
        }),
        xaxis: None,
        yaxis: None,
    };

    Figure { data: vec![trace], layout }
}

/// Build a 24-hour traffic volume line chart
pub fn traffic_flow(plan: &str) -> Figure {
    traffic_flow_with_rng(plan, &mut rand::thread_rng())
}

/// Same as [`traffic_flow`] with a caller-supplied random source
pub fn traffic_flow_with_rng<R: Rng + ?Sized>(_plan: &str, rng: &mut R) -> Figure {
    let hours: Vec<u32> = (0..24).collect();
    let volumes: Vec<u32> = hours.iter().map(|_| rng.gen_range(100..1000)).collect();

    Figure {
        data: vec![Trace::Scatter {
            x: hours,
            y: volumes,
            mode: "lines+markers".to_string(),
        }],
        layout: Layout {
            title: "24-Hour Traffic Flow Projection".to_string(),
            scene: None,
            xaxis: Some(Axis { title: "Hour of Day".to_string() }),
            yaxis: Some(Axis { title: "Traffic Volume".to_string() }),
        },
    }
}
