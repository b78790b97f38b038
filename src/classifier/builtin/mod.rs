//! Built-in classifiers.

mod developer_tools;
mod llm_frameworks;
mod nodejs;
mod python;
mod python_installs;
mod system_cleanup;
mod virtual_machines;

pub use developer_tools::DeveloperToolsClassifier;
pub use llm_frameworks::LlmFrameworksClassifier;
pub use nodejs::NodeClassifier;
pub use python::PythonClassifier;
pub use python_installs::PythonInstallsClassifier;
pub use system_cleanup::SystemCleanupClassifier;
pub use virtual_machines::VirtualMachinesClassifier;

use super::registry::ClassifierFactory;
use super::Classifier;
use crate::error::Result;
use crate::paths::HostPaths;

fn developer_tools(host: &HostPaths) -> Result<Box<dyn Classifier>> {
    Ok(Box::new(DeveloperToolsClassifier::new(host)))
}

fn llm_frameworks(host: &HostPaths) -> Result<Box<dyn Classifier>> {
    Ok(Box::new(LlmFrameworksClassifier::new(host)))
}

fn nodejs(host: &HostPaths) -> Result<Box<dyn Classifier>> {
    Ok(Box::new(NodeClassifier::new(host)))
}

fn python(host: &HostPaths) -> Result<Box<dyn Classifier>> {
    Ok(Box::new(PythonClassifier::new(host)))
}

fn python_installs(host: &HostPaths) -> Result<Box<dyn Classifier>> {
    Ok(Box::new(PythonInstallsClassifier::new(host)))
}

fn system_cleanup(host: &HostPaths) -> Result<Box<dyn Classifier>> {
    Ok(Box::new(SystemCleanupClassifier::new(host)))
}

fn virtual_machines(host: &HostPaths) -> Result<Box<dyn Classifier>> {
    Ok(Box::new(VirtualMachinesClassifier::new(host)))
}

/// Factory table for every built-in classifier, in scan order.
pub fn builtin_factories() -> Vec<ClassifierFactory> {
    vec![
        developer_tools as ClassifierFactory,
        llm_frameworks,
        nodejs,
        python,
        python_installs,
        system_cleanup,
        virtual_machines,
    ]
}
