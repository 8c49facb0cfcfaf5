// Mapper from the live view to the JSON model rendered by the panel page
use crate::application::live_view::LiveView;
use crate::domain::command::CommandAvailability;
use crate::domain::robot::Point;
use chrono::{DateTime, Utc};
use serde::Serialize;

const RETURNING_BANNER: &str = "El robot está regresando a la base debido a batería baja.";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelView {
    pub status: StatusBlock,
    pub chart: ChartView,
    pub controls: Vec<ControlView>,
    pub updated_at: Option<DateTime<Utc>>,
    /// Whether robot updates are still arriving. The page warns when they are not.
    pub feed_live: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusBlock {
    pub pos_x: String,
    pub pos_y: String,
    pub heading: String,
    pub energy: f64,
    pub elapsed_seconds: f64,
    pub activity: String,
    pub distances: DistanceBlock,
    pub returning_banner: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceBlock {
    pub front: f64,
    pub right: f64,
    pub rear: f64,
    pub left: f64,
    pub laser: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartView {
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Axis {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub position: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: &'static str,
    pub data: Vec<Point>,
    pub border_color: &'static str,
    pub background_color: &'static str,
    pub point_radius: u8,
    pub fill: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ControlView {
    pub command: &'static str,
    pub label: &'static str,
    pub enabled: bool,
}

pub fn panel_view(view: &LiveView) -> PanelView {
    PanelView {
        status: status_block(view),
        chart: chart_view(view),
        controls: CommandAvailability::for_state(&view.robot)
            .into_iter()
            .map(|a| ControlView {
                command: a.command.panel_name(),
                label: a.command.label(),
                enabled: a.enabled,
            })
            .collect(),
        updated_at: view.updated_at,
        feed_live: view.feed_live,
    }
}

fn status_block(view: &LiveView) -> StatusBlock {
    let robot = &view.robot;
    let ranges = &robot.range_readings;
    StatusBlock {
        pos_x: format!("{:.2}", robot.position.x),
        pos_y: format!("{:.2}", robot.position.y),
        heading: format!("{:.2}°", robot.heading),
        energy: robot.energy_level,
        elapsed_seconds: robot.elapsed_seconds,
        activity: robot.activity_state.clone(),
        distances: DistanceBlock {
            front: ranges.front,
            right: ranges.right,
            rear: ranges.rear,
            left: ranges.left,
            laser: ranges.laser,
        },
        returning_banner: robot.is_returning_to_base.then_some(RETURNING_BANNER),
    }
}

fn chart_view(view: &LiveView) -> ChartView {
    let series = &view.series;
    ChartView {
        x_axis: Axis {
            kind: "linear",
            position: "bottom",
        },
        y_axis: Axis {
            kind: "linear",
            position: "left",
        },
        datasets: vec![
            Dataset {
                label: "Mapa de la habitación",
                data: series.room_map.clone(),
                border_color: "rgb(75, 192, 192)",
                background_color: "rgba(75, 192, 192, 0.5)",
                point_radius: 3,
                fill: false,
            },
            Dataset {
                label: "Posición del robot",
                data: series.robot_position.clone(),
                border_color: "rgb(255, 99, 132)",
                background_color: "rgba(255, 99, 132, 0.5)",
                point_radius: 5,
                fill: false,
            },
            Dataset {
                label: "Límites del área",
                data: series.area_boundary.clone(),
                border_color: "rgb(255, 159, 64)",
                background_color: "rgba(255, 159, 64, 0.2)",
                point_radius: 0,
                fill: true,
            },
        ],
    }
}
