#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegistryStats {
  pub schemas_registered: usize,
  pub schemas_with_references: usize,
  pub reference_fields: usize,
  pub cycles_detected: usize,
  pub cycle_details: Vec<Vec<String>>,
}

impl RegistryStats {
  pub fn record_schema(&mut self, reference_count: usize) {
    self.schemas_registered += 1;
    self.reference_fields += reference_count;
    if reference_count > 0 {
      self.schemas_with_references += 1;
    }
  }

  pub fn record_cycle(&mut self, cycle: Vec<String>) {
    self.cycles_detected += 1;
    self.cycle_details.push(cycle);
  }

  pub fn record_cycles(&mut self, cycles: Vec<Vec<String>>) {
    for cycle in cycles {
      self.record_cycle(cycle);
    }
  }
}
