//! Import-Durchlauf: verarbeitet alle Elemente einer Registry genau einmal.

use std::collections::HashSet;

use super::report::{ElementOutcome, OutcomeStatus, PassReport};
use super::ElementDispatcher;
use crate::core::{ElementRegistry, ElementType};
use crate::host::ModelHost;
use crate::shared::{BuildOptions, Schedule};

/// Treibt den Dispatcher über alle Elemente einer Registry.
///
/// Fehler einzelner Elemente brechen den Durchlauf nie ab.
pub struct BuildPass<'a, H: ModelHost> {
    dispatcher: ElementDispatcher<'a, H>,
}

impl<'a, H: ModelHost> BuildPass<'a, H> {
    /// Erstellt einen Durchlauf über dem Host mit festen Optionen.
    pub fn new(host: &'a mut H, options: &'a BuildOptions) -> Self {
        Self {
            dispatcher: ElementDispatcher::new(host, options),
        }
    }

    /// Registry-Indizes in Verarbeitungsreihenfolge gemäß Schedule.
    pub fn processing_order(registry: &ElementRegistry, schedule: Schedule) -> Vec<usize> {
        let all = 0..registry.len();
        match schedule {
            Schedule::FileOrder => all.collect(),
            Schedule::SegmentsFirst => {
                let is_pipe = |index: &usize| {
                    registry
                        .get(*index)
                        .is_some_and(|e| e.element_type == ElementType::Pipe)
                };
                let (mut pipes, rest): (Vec<usize>, Vec<usize>) = all.partition(is_pipe);
                pipes.extend(rest);
                pipes
            }
        }
    }

    /// Verarbeitet alle Elemente und sammelt die Ergebnisse.
    pub fn run(&mut self, registry: &ElementRegistry) -> PassReport {
        let schedule = self.dispatcher.options().schedule;
        let order = Self::processing_order(registry, schedule);
        log::info!(
            "Import startet: {} Elemente ({:?})",
            registry.len(),
            schedule
        );

        let mut processed = HashSet::with_capacity(order.len());
        let mut report = PassReport::new();

        for index in order {
            let Some(element) = registry.get(index) else {
                continue;
            };
            if !processed.insert(element.position) {
                log::warn!(
                    "Position {} bereits verarbeitet, übersprungen",
                    element.position
                );
                continue;
            }

            let result = self.dispatcher.dispatch(registry, element);
            let (status, error) = match result {
                Ok(()) if matches!(element.element_type, ElementType::NotImplemented(_)) => {
                    (OutcomeStatus::Skipped, None)
                }
                Ok(()) => (OutcomeStatus::Succeeded, None),
                Err(e) => {
                    log::warn!("{}", e);
                    (OutcomeStatus::Failed, Some(e))
                }
            };

            report.record(ElementOutcome {
                position: element.position,
                element_type: element.element_type.tag().to_string(),
                status,
                error,
            });
        }

        report
    }
}
