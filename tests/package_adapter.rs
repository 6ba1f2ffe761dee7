use chrono::{DateTime, TimeZone, Utc};
use pkginfo::error::PkgInfoError;
use pkginfo::models::{Architecture, PackageId, PackageVersion};
use pkginfo::package::Package;
use pkginfo::platform::{NativePackage, PackageHandle, PlatformPackage};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Weak};
use tempfile::TempDir;

/// In-memory platform package for exercising the adapter end to end.
struct FixturePackage {
    id: PackageId,
    install_dir: PathBuf,
    display_name: String,
    logo: Option<PathBuf>,
    development_mode: bool,
    installed_date: DateTime<Utc>,
    dependencies: Vec<PackageHandle>,
}

impl FixturePackage {
    fn named(name: &str) -> Self {
        Self {
            id: PackageId::new(
                name.to_string(),
                PackageVersion::new(2, 1, 0, 0),
                "CN=Fixtures".to_string(),
                Architecture::Neutral,
            ),
            install_dir: PathBuf::from("/opt/fixtures").join(name),
            display_name: format!("{name} (fixture)"),
            logo: Some(PathBuf::from("/opt/fixtures").join(name).join("logo.png")),
            development_mode: false,
            installed_date: Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(),
            dependencies: Vec::new(),
        }
    }

    fn with_dependencies(mut self, dependencies: Vec<PackageHandle>) -> Self {
        self.dependencies = dependencies;
        self
    }
}

impl PlatformPackage for FixturePackage {
    fn identity(&self) -> PackageId {
        self.id.clone()
    }

    fn installed_path(&self) -> PathBuf {
        self.install_dir.clone()
    }

    fn dependencies(&self) -> Vec<PackageHandle> {
        self.dependencies.clone()
    }

    fn display_name(&self) -> String {
        self.display_name.clone()
    }

    fn logo(&self) -> Option<PathBuf> {
        self.logo.clone()
    }

    fn is_development_mode(&self) -> bool {
        self.development_mode
    }

    fn installed_date(&self) -> DateTime<Utc> {
        self.installed_date
    }
}

fn fixture_handle(name: &str) -> PackageHandle {
    Arc::new(FixturePackage::named(name))
}

#[test]
fn constructing_from_absent_handle_fails() {
    let result = Package::new(Weak::<FixturePackage>::new());
    assert!(matches!(result.unwrap_err(), PkgInfoError::MissingPackage));
}

#[test]
fn constructing_from_live_handle_succeeds() {
    let handle = fixture_handle("app");
    assert!(Package::new(Arc::downgrade(&handle)).is_ok());
}

#[test]
fn wrap_then_unwrap_returns_the_same_handle() {
    let handle = fixture_handle("app");
    let package = Package::new(Arc::downgrade(&handle)).unwrap();
    assert!(Arc::ptr_eq(&handle, &package.originator().unwrap()));
}

#[test]
fn id_is_reference_stable_across_calls() {
    let handle = fixture_handle("app");
    let package = Package::new(Arc::downgrade(&handle)).unwrap();

    let first = package.id().unwrap() as *const PackageId;
    let second = package.id().unwrap() as *const PackageId;
    assert_eq!(first, second);
    assert_eq!(package.id().unwrap().name, "app");
    assert_eq!(
        package.id().unwrap().full_name(),
        format!("app_2.1.0.0_neutral__{}", package.id().unwrap().publisher_id())
    );
}

#[test]
fn dependencies_wrap_originator_dependencies_in_order() {
    let alpha = fixture_handle("alpha");
    let beta = fixture_handle("beta");
    let handle: PackageHandle = Arc::new(
        FixturePackage::named("app").with_dependencies(vec![alpha.clone(), beta.clone()]),
    );

    let package = Package::new(Arc::downgrade(&handle)).unwrap();

    let dependencies = package.dependencies().unwrap();
    assert_eq!(dependencies.len(), 2);
    assert!(Arc::ptr_eq(&alpha, &dependencies[0].originator().unwrap()));
    assert!(Arc::ptr_eq(&beta, &dependencies[1].originator().unwrap()));

    // Same slice on every call.
    assert_eq!(
        dependencies.as_ptr(),
        package.dependencies().unwrap().as_ptr()
    );
}

#[test]
fn accessors_read_through_while_live() {
    let handle = fixture_handle("notes");
    let package = Package::new(Arc::downgrade(&handle)).unwrap();

    assert_eq!(package.display_name().as_deref(), Some("notes (fixture)"));
    assert_eq!(
        package.logo(),
        Some(PathBuf::from("/opt/fixtures/notes/logo.png"))
    );
    assert_eq!(package.is_development_mode(), Some(false));
    assert_eq!(
        package.installed_date(),
        Some(Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap())
    );

    let location = package.installed_location().unwrap();
    assert_eq!(location.path(), Path::new("/opt/fixtures/notes"));
    assert_eq!(location.name(), "notes");
}

#[test]
fn accessors_degrade_to_none_once_originator_dies() {
    let handle = fixture_handle("ephemeral");
    let package = Package::new(Arc::downgrade(&handle)).unwrap();
    drop(handle);

    assert!(package.originator().is_none());
    assert!(package.id().is_none());
    assert!(package.installed_location().is_none());
    assert!(package.dependencies().is_none());
    assert!(package.display_name().is_none());
    assert!(package.logo().is_none());
    assert!(package.is_development_mode().is_none());
    assert!(package.installed_date().is_none());
}

#[test]
fn cached_fields_outlive_the_originator() {
    let dependency = fixture_handle("dep");
    let handle: PackageHandle =
        Arc::new(FixturePackage::named("app").with_dependencies(vec![dependency.clone()]));
    let package = Package::new(Arc::downgrade(&handle)).unwrap();

    // Prime both caches, then let the platform drop the package.
    assert_eq!(package.id().unwrap().name, "app");
    assert_eq!(package.dependencies().unwrap().len(), 1);
    drop(handle);

    assert_eq!(package.id().unwrap().name, "app");
    let dependencies = package.dependencies().unwrap();
    assert_eq!(dependencies.len(), 1);
    assert_eq!(dependencies[0].display_name().as_deref(), Some("dep (fixture)"));
}

#[test]
fn adapter_over_a_manifest_backed_native_package() {
    let temp_dir = TempDir::new().unwrap();
    let dep_dir = temp_dir.path().join("deps/framework");
    fs::create_dir_all(&dep_dir).unwrap();
    fs::write(
        dep_dir.join("package.toml"),
        r#"
        name = "Contoso.Framework"
        version = "3.0.0.0"
        publisher = "CN=Contoso Ltd"
        "#,
    )
    .unwrap();
    fs::write(
        temp_dir.path().join("package.toml"),
        r#"
        name = "Contoso.Notes"
        version = "1.2.0.0"
        publisher = "CN=Contoso Ltd"
        display_name = "Contoso Notes"
        logo = "assets/logo.png"
        dependencies = ["deps/framework"]
        "#,
    )
    .unwrap();

    let handle: PackageHandle =
        Arc::new(NativePackage::load(temp_dir.path()).unwrap().unwrap());
    let package = Package::new(Arc::downgrade(&handle)).unwrap();

    let id = package.id().unwrap();
    assert_eq!(id.name, "Contoso.Notes");
    assert_eq!(id.version, PackageVersion::new(1, 2, 0, 0));

    assert_eq!(package.display_name().as_deref(), Some("Contoso Notes"));
    assert_eq!(package.is_development_mode(), Some(false));
    assert_eq!(
        package.logo(),
        Some(temp_dir.path().join("assets/logo.png"))
    );
    assert!(package.installed_location().unwrap().exists());
    assert!(package.installed_date().is_some());

    let dependencies = package.dependencies().unwrap();
    assert_eq!(dependencies.len(), 1);
    assert_eq!(dependencies[0].id().unwrap().name, "Contoso.Framework");
}
