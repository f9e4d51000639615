/// Estado de un Step en tiempo de ejecución.
///
/// Las transiciones válidas son:
/// - `Pending` -> `Running`
/// - `Running` -> `FinishedOk`
/// - `Running` -> `Failed`
///
/// Los pasos posteriores a un fallo permanecen en `Pending` para siempre.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// El paso está pendiente de ejecución.
    Pending,
    /// El paso está en ejecución.
    Running,
    /// El paso finalizó correctamente.
    FinishedOk,
    /// El paso falló.
    Failed,
}

impl StepStatus {
    pub fn can_transition_to(self, next: StepStatus) -> bool {
        matches!((self, next),
                 (StepStatus::Pending, StepStatus::Running)
                 | (StepStatus::Running, StepStatus::FinishedOk)
                 | (StepStatus::Running, StepStatus::Failed))
    }
}
