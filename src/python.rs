//! Python bindings, enabled by the `pyo3` feature.
//!
//! Exposes a graph with string names, string info and float weights. Missing
//! edges in the adjacency matrix are reported as `float('inf')`.
use pyo3::exceptions::{PyKeyError, PyValueError};
use pyo3::prelude::*;

use crate::graph::{Graph, GraphError};

impl From<GraphError> for PyErr {
    fn from(error: GraphError) -> Self {
        match error {
            GraphError::UnknownDestination => PyValueError::new_err(error.to_string()),
            GraphError::UnknownNode | GraphError::UnknownEdge => {
                PyKeyError::new_err(error.to_string())
            }
        }
    }
}

#[pyclass(name = "Graph")]
#[derive(Debug, Default)]
pub struct PyGraph {
    graph: Graph<String, String, f64>,
}

#[pymethods]
impl PyGraph {
    #[new]
    fn new() -> Self {
        Self::default()
    }

    fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    #[pyo3(signature = (name, info = None))]
    fn add_node(&mut self, name: String, info: Option<String>) {
        self.graph.add_node(name, info);
    }

    fn delete_node(&mut self, name: String) {
        self.graph.delete_node(&name);
    }

    fn find_node(&self, name: String) -> bool {
        self.graph.find_node(&name)
    }

    fn node_info(&self, name: String) -> Option<String> {
        self.graph.node_info(&name).cloned()
    }

    fn node_cardinality(&self) -> usize {
        self.graph.node_cardinality()
    }

    fn list_nodes(&self) -> Vec<String> {
        self.graph.list_nodes()
    }

    #[pyo3(signature = (source, destination, weight = 1.0))]
    fn add_edge(&mut self, source: String, destination: String, weight: f64) {
        self.graph.add_edge(&source, destination, weight);
    }

    #[pyo3(signature = (source, destination, weight = 1.0))]
    fn try_add_edge(
        &mut self,
        source: String,
        destination: String,
        weight: f64,
    ) -> PyResult<Option<f64>> {
        Ok(self.graph.try_add_edge(&source, destination, weight)?)
    }

    fn delete_edge(&mut self, source: String, destination: String) {
        self.graph.delete_edge(&source, &destination);
    }

    fn delete_edges(&mut self, name: String) {
        self.graph.delete_edges(&name);
    }

    fn find_edge(&self, source: String, destination: String) -> bool {
        self.graph.find_edge(&source, &destination)
    }

    fn edge_cardinality(&self) -> usize {
        self.graph.edge_cardinality()
    }

    fn self_loops(&self) -> usize {
        self.graph.self_loops()
    }

    fn adjacency_matrix(&self) -> Vec<Vec<f64>> {
        self.graph
            .adjacency_matrix()
            .rows()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.unwrap_or(f64::INFINITY))
                    .collect()
            })
            .collect()
    }

    fn list_edges(&self) -> Vec<(String, String, f64)> {
        self.graph.list_edges()
    }

    fn __len__(&self) -> usize {
        self.graph.node_cardinality()
    }

    fn __contains__(&self, name: String) -> bool {
        self.graph.find_node(&name)
    }

    fn __repr__(&self) -> String {
        format!("Graph({:?})", self.graph)
    }
}

#[pymodule]
fn linkgraph(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
    m.add_class::<PyGraph>()?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn scenario_through_python() -> PyResult<()> {
        pyo3::prepare_freethreaded_python();

        Python::with_gil(|py| {
            let graph = Py::new(py, PyGraph::new())?;
            for name in ["b", "a", "c"] {
                graph.call_method1(py, "add_node", (name,))?;
            }

            let nodes: Vec<String> = graph.call_method0(py, "list_nodes")?.extract(py)?;
            assert_eq!(nodes, ["a", "b", "c"]);
            assert_eq!(graph.as_ref(py).len()?, 3);
            assert!(graph.as_ref(py).contains("b")?);

            graph.call_method1(py, "add_edge", ("a", "b", 5.0))?;
            let found: bool = graph.call_method1(py, "find_edge", ("a", "b"))?.extract(py)?;
            assert!(found);

            graph.call_method1(py, "delete_edge", ("a", "b"))?;
            let count: usize = graph.call_method0(py, "edge_cardinality")?.extract(py)?;
            assert_eq!(count, 0);
            Ok(())
        })
    }

    #[test]
    fn matrix_uses_infinity() -> PyResult<()> {
        pyo3::prepare_freethreaded_python();

        Python::with_gil(|py| {
            let graph = Py::new(py, PyGraph::new())?;
            graph.call_method1(py, "add_node", ("a", "info"))?;
            graph.call_method1(py, "add_node", ("b",))?;
            graph.call_method1(py, "add_edge", ("a", "b"))?;

            let matrix: Vec<Vec<f64>> = graph.call_method0(py, "adjacency_matrix")?.extract(py)?;
            assert_eq!(matrix, [[f64::INFINITY, 1.0], [f64::INFINITY, f64::INFINITY]]);

            let info: Option<String> = graph.call_method1(py, "node_info", ("a",))?.extract(py)?;
            assert_eq!(info.as_deref(), Some("info"));
            Ok(())
        })
    }

    #[test]
    fn errors_map_to_python_exceptions() {
        pyo3::prepare_freethreaded_python();

        Python::with_gil(|py| {
            assert!(PyErr::from(GraphError::UnknownNode).is_instance_of::<PyKeyError>(py));
            assert!(PyErr::from(GraphError::UnknownEdge).is_instance_of::<PyKeyError>(py));
            assert!(
                PyErr::from(GraphError::UnknownDestination).is_instance_of::<PyValueError>(py)
            );

            let graph = Py::new(py, PyGraph::new()).unwrap();
            graph.call_method1(py, "add_node", ("a",)).unwrap();

            let error = graph
                .call_method1(py, "try_add_edge", ("a", "z"))
                .unwrap_err();
            assert!(error.is_instance_of::<PyValueError>(py));

            let error = graph
                .call_method1(py, "try_add_edge", ("z", "a"))
                .unwrap_err();
            assert!(error.is_instance_of::<PyKeyError>(py));
        });
    }
}
