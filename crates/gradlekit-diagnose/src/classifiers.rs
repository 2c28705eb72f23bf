//! Built-in classifiers for known Gradle plugin build failures.
//!
//! Classifiers are [`CauseVisitor`]s that accumulate boolean evidence
//! while a cause graph is walked and then render zero or more fixed
//! diagnostic lines. Flags are booleans, not counters: visiting several
//! matching nodes reports the same diagnostic once.

use crate::cause::BuildCause;
use crate::visitor::CauseVisitor;

/// Artifact group of the Gradle plugin development toolchain.
pub const PLUGIN_ARTIFACT_GROUP: &str = "dev.gradleplugins";

const PLUGIN_NOT_FOUND_PREFIX: &str = "Could not find dev.gradleplugins:";
const PLUGIN_NOT_RESOLVED_PREFIX: &str = "Could not resolve dev.gradleplugins:";

const PLUGIN_ARTIFACTS_DIAGNOSTIC: &str = "Gradle plugin development artifacts could not be resolved. Declare the plugin development repository in the build under test, for example: repositories { gradlePluginDevelopment() }.";

const GROOVY_RUNTIME_PREFIX: &str = "Could not find org.codehaus.groovy:groovy-all:";
const KOTLIN_RUNTIME_PREFIX: &str = "Could not find org.jetbrains.kotlin:kotlin-stdlib";
const GRADLE_API_COORDINATE_MARKER: &str = "dev.gradleplugins:gradle-api:";

const GROOVY_RUNTIME_DIAGNOSTIC: &str = "The Groovy runtime backing the Gradle API artifact could not be resolved. Add a repository serving org.codehaus.groovy:groovy-all, such as mavenCentral().";
const KOTLIN_RUNTIME_DIAGNOSTIC: &str = "The Kotlin runtime backing the Gradle API artifact could not be resolved. Add a repository serving org.jetbrains.kotlin:kotlin-stdlib, such as mavenCentral().";
const COMBINED_RUNTIME_DIAGNOSTIC: &str = "The Groovy and Kotlin runtimes backing the Gradle API artifact could not be resolved. Add a repository serving org.codehaus.groovy:groovy-all and org.jetbrains.kotlin:kotlin-stdlib, such as mavenCentral().";

/// Detects unresolved artifacts of the plugin development group.
///
/// Matches cause messages starting with either recognized resolution
/// failure prefix for [`PLUGIN_ARTIFACT_GROUP`].
#[derive(Debug, Default)]
pub struct MissingPluginArtifacts {
    detected: bool,
}

impl MissingPluginArtifacts {
    /// Creates a classifier with no evidence accumulated.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if at least one matching cause was visited.
    pub fn detected(&self) -> bool {
        self.detected
    }

    /// Renders the diagnostic lines for the accumulated evidence.
    pub fn report(&self) -> Vec<String> {
        if self.detected {
            vec![PLUGIN_ARTIFACTS_DIAGNOSTIC.to_string()]
        } else {
            Vec::new()
        }
    }
}

impl CauseVisitor for MissingPluginArtifacts {
    fn visit(&mut self, cause: &BuildCause) {
        if cause.message.starts_with(PLUGIN_NOT_FOUND_PREFIX)
            || cause.message.starts_with(PLUGIN_NOT_RESOLVED_PREFIX)
        {
            self.detected = true;
        }
    }
}

/// Detects unresolved runtime dependencies of the synthesized Gradle API.
///
/// The gradle-api artifact drags in a Groovy and a Kotlin runtime; a build
/// that can resolve the API but not its runtimes fails with a resolution
/// error naming the runtime coordinate and the API coordinate together.
/// The two runtimes are tracked independently.
#[derive(Debug, Default)]
pub struct MissingRuntimeDependencies {
    missing_groovy_runtime: bool,
    missing_kotlin_runtime: bool,
}

impl MissingRuntimeDependencies {
    /// Creates a classifier with no evidence accumulated.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if a missing Groovy runtime was detected.
    pub fn missing_groovy_runtime(&self) -> bool {
        self.missing_groovy_runtime
    }

    /// Returns `true` if a missing Kotlin runtime was detected.
    pub fn missing_kotlin_runtime(&self) -> bool {
        self.missing_kotlin_runtime
    }

    /// Renders the diagnostic lines for the accumulated evidence.
    ///
    /// Emits the combined line when both runtimes are missing, the
    /// runtime-specific line when exactly one is, and nothing otherwise.
    pub fn report(&self) -> Vec<String> {
        match (self.missing_groovy_runtime, self.missing_kotlin_runtime) {
            (true, true) => vec![COMBINED_RUNTIME_DIAGNOSTIC.to_string()],
            (true, false) => vec![GROOVY_RUNTIME_DIAGNOSTIC.to_string()],
            (false, true) => vec![KOTLIN_RUNTIME_DIAGNOSTIC.to_string()],
            (false, false) => Vec::new(),
        }
    }
}

impl CauseVisitor for MissingRuntimeDependencies {
    fn visit(&mut self, cause: &BuildCause) {
        if !cause.message.contains(GRADLE_API_COORDINATE_MARKER) {
            return;
        }
        if cause.message.starts_with(GROOVY_RUNTIME_PREFIX) {
            self.missing_groovy_runtime = true;
        }
        if cause.message.starts_with(KOTLIN_RUNTIME_PREFIX) {
            self.missing_kotlin_runtime = true;
        }
    }
}
