//! Plotly adapter.
//!
//! Records `newPlot` calls as serialized JSON. A later call for the same
//! mount replaces the earlier one, matching `Plotly.newPlot` semantics.

use serde::Serialize;
use serde_json::Value;

use super::{ChartAdapter, ChartError, Layout, PlotConfig, Trace};

/// One recorded `Plotly.newPlot` call.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotCall {
    /// Target element id.
    pub mount_id: String,
    /// Serialized trace list.
    pub traces: Value,
    /// Serialized layout.
    pub layout: Value,
    /// Serialized interaction config.
    pub config: Value,
}

impl PlotCall {
    /// The JavaScript statement for this call.
    #[must_use]
    pub fn to_js(&self) -> String {
        format!(
            "Plotly.newPlot({}, {}, {}, {});",
            script_json(&Value::String(self.mount_id.clone())),
            script_json(&self.traces),
            script_json(&self.layout),
            script_json(&self.config),
        )
    }
}

/// Chart adapter that collects Plotly calls for page assembly.
#[derive(Debug, Clone, Default)]
pub struct PlotlyAdapter {
    calls: Vec<PlotCall>,
}

impl PlotlyAdapter {
    /// Create an adapter with no recorded calls.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded calls, in first-draw order.
    #[must_use]
    pub fn calls(&self) -> &[PlotCall] {
        &self.calls
    }

    /// The call for a given mount, if any.
    #[must_use]
    pub fn call(&self, mount_id: &str) -> Option<&PlotCall> {
        self.calls.iter().find(|c| c.mount_id == mount_id)
    }

    /// Script body drawing every recorded chart.
    #[must_use]
    pub fn to_script(&self) -> String {
        self.calls
            .iter()
            .map(PlotCall::to_js)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl ChartAdapter for PlotlyAdapter {
    fn new_plot(
        &mut self,
        mount_id: &str,
        traces: &[Trace],
        layout: &Layout,
        config: &PlotConfig,
    ) -> Result<(), ChartError> {
        let call = PlotCall {
            mount_id: mount_id.to_string(),
            traces: to_value(mount_id, traces)?,
            layout: to_value(mount_id, layout)?,
            config: to_value(mount_id, config)?,
        };

        if let Some(existing) = self.calls.iter_mut().find(|c| c.mount_id == mount_id) {
            *existing = call;
        } else {
            self.calls.push(call);
        }
        Ok(())
    }
}

fn to_value<T: Serialize + ?Sized>(mount_id: &str, spec: &T) -> Result<Value, ChartError> {
    serde_json::to_value(spec).map_err(|source| ChartError::Serialize {
        mount_id: mount_id.to_string(),
        source,
    })
}

// JSON inside <script>: `</` must not close the element.
fn script_json(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}
