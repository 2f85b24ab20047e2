//! The entity store, single owner of every fleet collection.
//!
//! All mutations go through `&mut self`, one at a time. Each one replaces the
//! affected entity in place, emits a [`Notice`], and for vehicles,
//! reservations and employees also records an [`Activity`].
//!
//! Lookup misses on update/delete are not errors: the call returns `None`
//! and an error notice is emitted. Required-field validation belongs to the
//! caller; the store inserts whatever it is given.

use std::fmt::Display;

use chrono::NaiveDate;
use fleetdash_domain::activity::{Activity, ActivityKind, ActivityLog};
use fleetdash_domain::analytics::{self, FleetSummary, UsageFilter, UsageReport};
use fleetdash_domain::availability::{self, Availability};
use fleetdash_domain::department::{self, Department, DepartmentPatch, NewDepartment};
use fleetdash_domain::employee::{Employee, EmployeePatch, NewEmployee};
use fleetdash_domain::error::{ConflictError, FleetError, NotFoundError, ValidationError};
use fleetdash_domain::id::{DepartmentId, EmployeeId, ProjectId, ReservationId, VehicleId};
use fleetdash_domain::period::{DayRange, Period};
use fleetdash_domain::project::{NewProject, Project, ProjectPatch};
use fleetdash_domain::reservation::{NewReservation, Reservation, ReservationPatch};
use fleetdash_domain::time::{Clock, Timestamp};
use fleetdash_domain::timeline::{self, BookerReservations, TimelineRow};
use fleetdash_domain::vehicle::{NewVehicle, Vehicle, VehiclePatch};

use crate::ports::{Notice, Notifier};
use crate::session::Session;

/// Every collection the store owns, as loaded or seeded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FleetSnapshot {
    pub vehicles: Vec<Vehicle>,
    pub reservations: Vec<Reservation>,
    pub employees: Vec<Employee>,
    pub projects: Vec<Project>,
    pub departments: Vec<Department>,
}

pub struct FleetStore<N, C> {
    vehicles: Vec<Vehicle>,
    reservations: Vec<Reservation>,
    employees: Vec<Employee>,
    projects: Vec<Project>,
    departments: Vec<Department>,
    activities: ActivityLog,
    notifier: N,
    clock: C,
}

impl<N: Notifier, C: Clock> FleetStore<N, C> {
    /// Create an empty store.
    pub fn new(notifier: N, clock: C) -> Self {
        Self::from_snapshot(FleetSnapshot::default(), notifier, clock)
    }

    /// Create a store owning the collections of `snapshot`.
    pub fn from_snapshot(snapshot: FleetSnapshot, notifier: N, clock: C) -> Self {
        Self {
            vehicles: snapshot.vehicles,
            reservations: snapshot.reservations,
            employees: snapshot.employees,
            projects: snapshot.projects,
            departments: snapshot.departments,
            activities: ActivityLog::new(),
            notifier,
            clock,
        }
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    // --- reads ---

    /// Every vehicle with status and last user derived at the current instant.
    pub fn vehicles(&self) -> Vec<Vehicle> {
        let now = self.now();
        self.vehicles
            .iter()
            .map(|v| availability::derive_vehicle_status(v, &self.reservations, now))
            .collect()
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<Vehicle> {
        self.vehicles
            .iter()
            .find(|v| v.id == id)
            .map(|v| availability::derive_vehicle_status(v, &self.reservations, self.now()))
    }

    pub fn search_vehicles(&self, query: &str) -> Vec<Vehicle> {
        self.vehicles()
            .into_iter()
            .filter(|v| v.matches_search(query))
            .collect()
    }

    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn reservation(&self, id: ReservationId) -> Option<&Reservation> {
        self.reservations.iter().find(|r| r.id == id)
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn employee(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    /// Sector labels of the department tree, parents first.
    pub fn sector_labels(&self) -> Vec<String> {
        department::sector_labels(&self.departments)
    }

    /// Recent activities, newest first.
    pub fn activities(&self) -> impl Iterator<Item = &Activity> {
        self.activities.entries()
    }

    // --- availability & analytics ---

    /// Availability of a vehicle at `instant`, or `None` for an unknown vehicle.
    pub fn status_at(&self, id: VehicleId, instant: Timestamp) -> Option<Availability> {
        self.vehicles
            .iter()
            .find(|v| v.id == id)
            .map(|v| availability::status_at(v, &self.reservations, instant))
    }

    pub fn find_conflict(&self, vehicle_id: VehicleId, candidate: &Period) -> Option<&Reservation> {
        availability::find_conflict(&self.reservations, vehicle_id, candidate)
    }

    pub fn has_conflict(&self, vehicle_id: VehicleId, candidate: &Period) -> bool {
        availability::has_conflict(&self.reservations, vehicle_id, candidate)
    }

    pub fn usage(&self, range: DayRange, filter: &UsageFilter) -> UsageReport {
        analytics::usage_report(
            range,
            filter,
            &self.reservations,
            &self.vehicles,
            &self.projects,
        )
    }

    pub fn summary(&self) -> FleetSummary {
        analytics::summarize(&self.vehicles, &self.reservations, self.now())
    }

    pub fn timeline(&self, start: NaiveDate, days: u32) -> Vec<TimelineRow> {
        timeline::timeline(&self.vehicles, &self.reservations, start, days)
    }

    /// Reservations booked by the session user, grouped for display.
    pub fn reservations_of(&self, session: &Session) -> BookerReservations {
        timeline::group_for_booker(&self.reservations, session.user_name(), self.now())
    }

    // --- vehicles ---

    /// # Errors
    ///
    /// Returns [`ValidationError::IdsExhausted`] when no vehicle id is left.
    #[tracing::instrument(skip_all, fields(user = %session.user_name(), plate = %draft.plate))]
    pub fn add_vehicle(
        &mut self,
        session: &Session,
        draft: NewVehicle,
    ) -> Result<Vehicle, FleetError> {
        let next = VehicleId::next_after(self.vehicles.iter().map(|v| v.id));
        let id = self.allocate("vehicle", next)?;
        let vehicle = draft.with_id(id);
        self.vehicles.push(vehicle.clone());

        self.record(
            session,
            ActivityKind::VehicleAdded,
            format!("Vehicle {} added", vehicle.plate),
        );
        self.notify_success(format!("Vehicle {} added successfully", vehicle.plate));
        tracing::debug!(%id, "vehicle added");
        Ok(vehicle)
    }

    #[tracing::instrument(skip(self, session, patch), fields(user = %session.user_name()))]
    pub fn update_vehicle(
        &mut self,
        session: &Session,
        id: VehicleId,
        patch: VehiclePatch,
    ) -> Option<Vehicle> {
        let Some(index) = self.vehicles.iter().position(|v| v.id == id) else {
            self.missing("Vehicle", id);
            return None;
        };
        patch.apply(&mut self.vehicles[index]);
        let updated =
            availability::derive_vehicle_status(&self.vehicles[index], &self.reservations, self.now());

        self.record(
            session,
            ActivityKind::VehicleUpdated,
            format!("Vehicle {} updated", updated.plate),
        );
        self.notify_success("Vehicle updated successfully");
        Some(updated)
    }

    #[tracing::instrument(skip(self, session), fields(user = %session.user_name()))]
    pub fn delete_vehicle(&mut self, session: &Session, id: VehicleId) -> Option<Vehicle> {
        let Some(index) = self.vehicles.iter().position(|v| v.id == id) else {
            self.missing("Vehicle", id);
            return None;
        };
        let removed = self.vehicles.remove(index);
        let removed = availability::derive_vehicle_status(&removed, &self.reservations, self.now());

        self.record(
            session,
            ActivityKind::VehicleDeleted,
            format!("Vehicle {} deleted", removed.plate),
        );
        self.notify_success(format!("Vehicle {} deleted successfully", removed.plate));
        Some(removed)
    }

    // --- reservations ---

    /// Add `draft` as a `pending` reservation without checking for conflicts.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::IdsExhausted`] when no reservation id is left.
    #[tracing::instrument(skip_all, fields(user = %session.user_name(), vehicle = %draft.vehicle_id))]
    pub fn add_reservation(
        &mut self,
        session: &Session,
        draft: NewReservation,
    ) -> Result<Reservation, FleetError> {
        let next = ReservationId::next_after(self.reservations.iter().map(|r| r.id));
        let id = self.allocate("reservation", next)?;
        let reservation = draft.into_pending(id);
        self.reservations.push(reservation.clone());

        let message = format!(
            "New reservation for {} by {}",
            self.plate_of(reservation.vehicle_id),
            reservation.booker_name
        );
        self.record(session, ActivityKind::ReservationCreated, message);
        self.notify_success("Reservation submitted for approval");
        tracing::debug!(%id, "reservation added");
        Ok(reservation)
    }

    /// Add `draft` as a `pending` reservation unless it overlaps a
    /// non-rejected reservation of the same vehicle.
    ///
    /// # Errors
    ///
    /// Returns [`FleetError::Conflict`] describing the first overlapping
    /// reservation; nothing is added in that case.
    pub fn submit_reservation(
        &mut self,
        session: &Session,
        draft: NewReservation,
    ) -> Result<Reservation, FleetError> {
        let conflict = self
            .find_conflict(draft.vehicle_id, &draft.period())
            .map(ConflictError::from);
        if let Some(conflict) = conflict {
            tracing::info!(existing = %conflict.reservation_id, "reservation submission blocked");
            return Err(self.fail(conflict.into()));
        }
        self.add_reservation(session, draft)
    }

    #[tracing::instrument(skip(self, session, patch), fields(user = %session.user_name()))]
    pub fn update_reservation(
        &mut self,
        session: &Session,
        id: ReservationId,
        patch: ReservationPatch,
    ) -> Option<Reservation> {
        let Some(reservation) = self.reservations.iter_mut().find(|r| r.id == id) else {
            self.missing("Reservation", id);
            return None;
        };
        patch.apply(reservation);
        let updated = reservation.clone();

        let message = format!(
            "Reservation for {} updated for {}",
            self.plate_of(updated.vehicle_id),
            updated.booker_name
        );
        self.record(session, ActivityKind::ReservationUpdated, message);
        self.notify_success("Reservation updated successfully");
        Some(updated)
    }

    #[tracing::instrument(skip(self, session), fields(user = %session.user_name()))]
    pub fn delete_reservation(&mut self, session: &Session, id: ReservationId) -> Option<Reservation> {
        let Some(index) = self.reservations.iter().position(|r| r.id == id) else {
            self.missing("Reservation", id);
            return None;
        };
        let removed = self.reservations.remove(index);

        let message = format!(
            "Reservation for {} deleted for {}",
            self.plate_of(removed.vehicle_id),
            removed.booker_name
        );
        self.record(session, ActivityKind::ReservationDeleted, message);
        self.notify_success("Reservation deleted successfully");
        Some(removed)
    }

    /// Approve a pending reservation on behalf of the session user.
    ///
    /// Approving an already approved reservation changes nothing and records
    /// no activity. Overlapping reservations are left untouched.
    ///
    /// # Errors
    ///
    /// - [`FleetError::Forbidden`] when the session user is not an admin
    /// - [`FleetError::NotFound`] when no reservation has `id`
    /// - [`FleetError::Validation`] when the reservation was rejected
    #[tracing::instrument(skip(self, session), fields(user = %session.user_name()))]
    pub fn approve_reservation(
        &mut self,
        session: &Session,
        id: ReservationId,
    ) -> Result<Reservation, FleetError> {
        let now = self.now();
        let index = self.authorized_index(session, "approve reservations", id)?;
        let changed = self.reservations[index]
            .approve(session.user_name(), now)
            .map_err(|err| self.fail(err))?;
        let reservation = self.reservations[index].clone();

        if changed {
            let message = format!(
                "Reservation for {} approved for {}",
                self.plate_of(reservation.vehicle_id),
                reservation.booker_name
            );
            self.record(session, ActivityKind::ReservationApproved, message);
        }
        self.notify_success("Reservation approved successfully");
        Ok(reservation)
    }

    /// Reject a pending reservation. The vehicle is never touched.
    ///
    /// # Errors
    ///
    /// - [`FleetError::Forbidden`] when the session user is not an admin
    /// - [`FleetError::NotFound`] when no reservation has `id`
    /// - [`FleetError::Validation`] when the reservation was approved
    #[tracing::instrument(skip(self, session), fields(user = %session.user_name()))]
    pub fn reject_reservation(
        &mut self,
        session: &Session,
        id: ReservationId,
    ) -> Result<Reservation, FleetError> {
        let index = self.authorized_index(session, "reject reservations", id)?;
        let changed = self.reservations[index]
            .reject()
            .map_err(|err| self.fail(err))?;
        let reservation = self.reservations[index].clone();

        if changed {
            let message = format!(
                "Reservation for {} rejected for {}",
                self.plate_of(reservation.vehicle_id),
                reservation.booker_name
            );
            self.record(session, ActivityKind::ReservationRejected, message);
        }
        self.notify_success("Reservation rejected");
        Ok(reservation)
    }

    // --- employees ---

    /// # Errors
    ///
    /// Returns [`ValidationError::IdsExhausted`] when no employee id is left.
    #[tracing::instrument(skip_all, fields(user = %session.user_name()))]
    pub fn add_employee(
        &mut self,
        session: &Session,
        draft: NewEmployee,
    ) -> Result<Employee, FleetError> {
        let next = EmployeeId::next_after(self.employees.iter().map(|e| e.id));
        let id = self.allocate("employee", next)?;
        let employee = draft.with_id(id);
        self.employees.push(employee.clone());

        self.record(
            session,
            ActivityKind::EmployeeAdded,
            format!("Employee {} added", employee.name),
        );
        self.notify_success(format!("Employee {} added successfully", employee.name));
        Ok(employee)
    }

    #[tracing::instrument(skip(self, session, patch), fields(user = %session.user_name()))]
    pub fn update_employee(
        &mut self,
        session: &Session,
        id: EmployeeId,
        patch: EmployeePatch,
    ) -> Option<Employee> {
        let Some(employee) = self.employees.iter_mut().find(|e| e.id == id) else {
            self.missing("Employee", id);
            return None;
        };
        patch.apply(employee);
        let updated = employee.clone();

        self.record(
            session,
            ActivityKind::EmployeeUpdated,
            format!("Employee {} updated", updated.name),
        );
        self.notify_success("Employee updated successfully");
        Some(updated)
    }

    #[tracing::instrument(skip(self, session), fields(user = %session.user_name()))]
    pub fn delete_employee(&mut self, session: &Session, id: EmployeeId) -> Option<Employee> {
        let Some(index) = self.employees.iter().position(|e| e.id == id) else {
            self.missing("Employee", id);
            return None;
        };
        let removed = self.employees.remove(index);

        self.record(
            session,
            ActivityKind::EmployeeDeleted,
            format!("Employee {} deleted", removed.name),
        );
        self.notify_success(format!("Employee {} deleted successfully", removed.name));
        Some(removed)
    }

    // --- projects ---

    /// # Errors
    ///
    /// Returns [`ValidationError::IdsExhausted`] when no project id is left.
    #[tracing::instrument(skip_all)]
    pub fn add_project(&mut self, draft: NewProject) -> Result<Project, FleetError> {
        let next = ProjectId::next_after(self.projects.iter().map(|p| p.id));
        let id = self.allocate("project", next)?;
        let project = draft.with_id(id);
        self.projects.push(project.clone());
        self.notify_success(format!("Project \"{}\" added successfully", project.name));
        Ok(project)
    }

    #[tracing::instrument(skip(self, patch))]
    pub fn update_project(&mut self, id: ProjectId, patch: ProjectPatch) -> Option<Project> {
        let Some(project) = self.projects.iter_mut().find(|p| p.id == id) else {
            self.missing("Project", id);
            return None;
        };
        patch.apply(project);
        let updated = project.clone();
        self.notify_success("Project updated successfully");
        Some(updated)
    }

    /// Remove a project. Reservations referencing it keep their dangling id.
    #[tracing::instrument(skip(self))]
    pub fn delete_project(&mut self, id: ProjectId) -> Option<Project> {
        let Some(index) = self.projects.iter().position(|p| p.id == id) else {
            self.missing("Project", id);
            return None;
        };
        let removed = self.projects.remove(index);
        self.notify_success(format!("Project \"{}\" deleted successfully", removed.name));
        Some(removed)
    }

    // --- departments ---

    #[tracing::instrument(skip_all)]
    pub fn add_department(&mut self, draft: NewDepartment) -> Department {
        let department = draft.into_department();
        self.departments.push(department.clone());
        self.notify_success(format!(
            "Department \"{}\" added successfully",
            department.name
        ));
        department
    }

    #[tracing::instrument(skip(self, patch))]
    pub fn update_department(
        &mut self,
        id: &DepartmentId,
        patch: DepartmentPatch,
    ) -> Option<Department> {
        let Some(department) = self.departments.iter_mut().find(|d| &d.id == id) else {
            self.missing("Department", id);
            return None;
        };
        patch.apply(department);
        let updated = department.clone();
        self.notify_success("Department updated successfully");
        Some(updated)
    }

    /// Remove a department and its direct children.
    ///
    /// Grandchildren are kept: the tree is two levels deep. Returns every
    /// removed department, the requested one first, or `None` if `id` is unknown.
    #[tracing::instrument(skip(self))]
    pub fn delete_department(&mut self, id: &DepartmentId) -> Option<Vec<Department>> {
        let Some(index) = self.departments.iter().position(|d| &d.id == id) else {
            self.missing("Department", id);
            return None;
        };
        let target = self.departments.remove(index);
        let (children, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.departments)
            .into_iter()
            .partition(|d| d.parent.as_ref() == Some(id));
        self.departments = kept;

        self.notify_success(format!(
            "Department \"{}\" deleted successfully",
            target.name
        ));
        tracing::debug!(children = children.len(), "department deleted");
        Some(std::iter::once(target).chain(children).collect())
    }

    // --- helpers ---

    fn plate_of(&self, id: VehicleId) -> String {
        self.vehicles
            .iter()
            .find(|v| v.id == id)
            .map_or_else(|| format!("vehicle #{id}"), |v| v.plate.clone())
    }

    fn record(&mut self, session: &Session, kind: ActivityKind, message: String) {
        let activity = Activity::new(kind, message, session.user_name(), self.now());
        self.activities.record(activity);
    }

    fn notify_success(&self, message: impl Into<String>) {
        self.notifier.notify(Notice::success(message));
    }

    fn missing(&self, entity: &'static str, id: impl Display) {
        tracing::warn!(entity, %id, "lookup miss, nothing changed");
        self.notifier
            .notify(Notice::error(format!("{entity} {id} not found")));
    }

    fn allocate<I>(&self, entity: &'static str, next: Option<I>) -> Result<I, FleetError> {
        next.ok_or_else(|| self.fail(ValidationError::IdsExhausted(entity).into()))
    }

    fn fail(&self, err: FleetError) -> FleetError {
        self.notifier.notify(Notice::error(describe(&err)));
        err
    }

    fn authorized_index(
        &self,
        session: &Session,
        action: &'static str,
        id: ReservationId,
    ) -> Result<usize, FleetError> {
        session.require_admin(action).map_err(|err| self.fail(err))?;
        self.reservations
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| {
                self.fail(
                    NotFoundError {
                        entity: "Reservation",
                        id: id.to_string(),
                    }
                    .into(),
                )
            })
    }
}

/// The innermost message of `err`, suitable for a notice.
fn describe(err: &FleetError) -> String {
    match err {
        FleetError::Validation(inner) => inner.to_string(),
        FleetError::NotFound(inner) => inner.to_string(),
        FleetError::Conflict(inner) => inner.to_string(),
        FleetError::Forbidden(inner) => inner.to_string(),
        FleetError::Source(inner) => inner.to_string(),
    }
}
