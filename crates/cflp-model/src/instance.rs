//! Immutable facility location instance.

use std::fmt;

use cflp_core::InstanceError;

/// A potential facility, identified by its index in [`Instance::facilities`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Facility {
    pub capacity: f64,
    pub fixed_cost: f64,
}

/// A demand point, identified by its index in [`Instance::sites`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Site {
    pub demand: f64,
}

/// Complete facility x site allocation cost matrix.
///
/// Stored row-major: all sites of facility 0, then facility 1, and so on.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllocationCosts {
    facilities: usize,
    sites: usize,
    values: Vec<f64>,
}

impl AllocationCosts {
    /// Wraps an already validated row-major buffer.
    pub(crate) fn from_row_major(facilities: usize, sites: usize, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), facilities * sites);
        AllocationCosts {
            facilities,
            sites,
            values,
        }
    }

    /// Builds the matrix from one row per facility.
    pub fn from_rows(rows: Vec<Vec<f64>>, sites: usize) -> Result<Self, InstanceError> {
        let facilities = rows.len();
        let mut values = Vec::with_capacity(facilities * sites);
        for row in rows {
            if row.len() != sites {
                return Err(InstanceError::DimensionMismatch {
                    what: "allocation cost row",
                    expected: sites,
                    actual: row.len(),
                });
            }
            values.extend(row);
        }
        for (index, &value) in values.iter().enumerate() {
            check_value("allocation cost", index, value)?;
        }
        Ok(Self::from_row_major(facilities, sites, values))
    }

    /// Cost of serving `site` from `facility`.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    #[inline]
    pub fn get(&self, facility: usize, site: usize) -> f64 {
        assert!(site < self.sites, "site {} out of range", site);
        self.values[facility * self.sites + site]
    }

    /// All site costs of one facility.
    ///
    /// # Panics
    /// Panics if `facility` is out of range.
    #[inline]
    pub fn row(&self, facility: usize) -> &[f64] {
        &self.values[facility * self.sites..(facility + 1) * self.sites]
    }

    pub fn num_facilities(&self) -> usize {
        self.facilities
    }

    pub fn num_sites(&self) -> usize {
        self.sites
    }
}

fn check_value(what: &'static str, index: usize, value: f64) -> Result<(), InstanceError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(InstanceError::InvalidValue { what, index, value })
    }
}

/// Facilities, sites and allocation costs of one problem.
///
/// An instance always has at least one facility and one site, and its cost
/// matrix matches both dimensions. It is never mutated after construction,
/// so one instance can back any number of concurrent evaluations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instance {
    facilities: Vec<Facility>,
    sites: Vec<Site>,
    costs: AllocationCosts,
}

impl Instance {
    /// Assembles parts whose values and dimensions are already checked.
    pub(crate) fn from_checked(
        facilities: Vec<Facility>,
        sites: Vec<Site>,
        costs: AllocationCosts,
    ) -> Self {
        debug_assert!(!facilities.is_empty() && !sites.is_empty());
        debug_assert_eq!(costs.num_facilities(), facilities.len());
        debug_assert_eq!(costs.num_sites(), sites.len());
        Instance {
            facilities,
            sites,
            costs,
        }
    }

    /// Builds an instance from in-memory data.
    ///
    /// # Examples
    ///
    /// ```
    /// use cflp_model::Instance;
    ///
    /// let instance = Instance::from_parts(
    ///     vec![10.0, 10.0],
    ///     vec![5.0, 7.0],
    ///     vec![4.0, 4.0],
    ///     vec![vec![1.0, 2.0], vec![3.0, 1.0]],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(instance.num_facilities(), 2);
    /// assert_eq!(instance.allocation_cost(1, 0), 3.0);
    /// ```
    pub fn from_parts(
        capacities: Vec<f64>,
        fixed_costs: Vec<f64>,
        demands: Vec<f64>,
        cost_rows: Vec<Vec<f64>>,
    ) -> Result<Self, InstanceError> {
        if capacities.is_empty() {
            return Err(InstanceError::Empty { what: "facility" });
        }
        if demands.is_empty() {
            return Err(InstanceError::Empty { what: "site" });
        }
        let num_facilities = capacities.len();
        if fixed_costs.len() != num_facilities {
            return Err(InstanceError::DimensionMismatch {
                what: "fixed costs",
                expected: num_facilities,
                actual: fixed_costs.len(),
            });
        }
        if cost_rows.len() != num_facilities {
            return Err(InstanceError::DimensionMismatch {
                what: "allocation cost rows",
                expected: num_facilities,
                actual: cost_rows.len(),
            });
        }

        let mut facilities = Vec::with_capacity(num_facilities);
        for (index, (capacity, fixed_cost)) in capacities.into_iter().zip(fixed_costs).enumerate() {
            check_value("capacity", index, capacity)?;
            check_value("fixed cost", index, fixed_cost)?;
            facilities.push(Facility {
                capacity,
                fixed_cost,
            });
        }

        let mut sites = Vec::with_capacity(demands.len());
        for (index, demand) in demands.into_iter().enumerate() {
            check_value("demand", index, demand)?;
            sites.push(Site { demand });
        }

        let costs = AllocationCosts::from_rows(cost_rows, sites.len())?;
        Ok(Self::from_checked(facilities, sites, costs))
    }

    pub fn num_facilities(&self) -> usize {
        self.facilities.len()
    }

    pub fn num_sites(&self) -> usize {
        self.sites.len()
    }

    pub fn facilities(&self) -> &[Facility] {
        &self.facilities
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// # Panics
    /// Panics if `index >= self.num_facilities()`.
    pub fn facility(&self, index: usize) -> &Facility {
        &self.facilities[index]
    }

    /// # Panics
    /// Panics if `index >= self.num_sites()`.
    pub fn site(&self, index: usize) -> &Site {
        &self.sites[index]
    }

    pub fn allocation_costs(&self) -> &AllocationCosts {
        &self.costs
    }

    #[inline]
    pub fn allocation_cost(&self, facility: usize, site: usize) -> f64 {
        self.costs.get(facility, site)
    }

    pub fn total_demand(&self) -> f64 {
        self.sites.iter().map(|s| s.demand).sum()
    }

    pub fn total_capacity(&self) -> f64 {
        self.facilities.iter().map(|f| f.capacity).sum()
    }

    /// Largest raw cost any complete assignment can reach.
    ///
    /// Every facility opened plus, for each site, its most expensive
    /// allocation.
    pub fn cost_upper_bound(&self) -> f64 {
        let opening: f64 = self.facilities.iter().map(|f| f.fixed_cost).sum();
        let allocation: f64 = (0..self.num_sites())
            .map(|site| {
                (0..self.num_facilities())
                    .map(|facility| self.costs.get(facility, site))
                    .fold(0.0, f64::max)
            })
            .sum();
        opening + allocation
    }

    /// Renders the instance in the source format accepted by
    /// [`parse_instance`](crate::parse_instance).
    pub fn to_source(&self) -> String {
        self.to_string()
    }
}

/// Writes the header, one `capacity fixed_cost` line per facility, the
/// demands on one line and one cost row per facility.
impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.num_facilities(), self.num_sites())?;
        for facility in &self.facilities {
            writeln!(f, "{} {}", facility.capacity, facility.fixed_cost)?;
        }
        write_line(f, self.sites.iter().map(|s| s.demand))?;
        for facility in 0..self.num_facilities() {
            write_line(f, self.costs.row(facility).iter().copied())?;
        }
        Ok(())
    }
}

fn write_line(f: &mut fmt::Formatter<'_>, values: impl Iterator<Item = f64>) -> fmt::Result {
    for (i, value) in values.enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{}", value)?;
    }
    writeln!(f)
}
