//! Source templates for generated projects.
//!
//! Placeholders are written `{{name}}`. Anything else, including Java braces
//! and Maven `${...}` properties, passes through untouched.

use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::error::{Error, Result};

pub const ENTITY: &str = "entity";
pub const REPOSITORY: &str = "repository";
pub const RESOURCE: &str = "resource";
pub const POM: &str = "pom";
pub const APPLICATION_PROPERTIES: &str = "application.properties";
pub const README: &str = "readme";

const DEFAULT_ENTITY: &str = r#"package {{package}}.entities;

import jakarta.persistence.*;
{{imports}}
@Entity
@Table(name = "{{table_name}}")
public class {{class_name}} {

{{fields}}
{{relation_fields}}
{{accessors}}
{{relation_methods}}
}
"#;

const DEFAULT_REPOSITORY: &str = r#"package {{package}}.repositories;

import jakarta.enterprise.context.ApplicationScoped;
import jakarta.inject.Inject;
import jakarta.persistence.EntityManager;
import jakarta.persistence.TypedQuery;
import {{package}}.entities.{{entity}};
import java.util.Collection;

@ApplicationScoped
public class {{entity}}Repository {

    @Inject
    EntityManager em;

    public {{entity}} find(Long id) {
        return em.find({{entity}}.class, id);
    }

    public Collection<{{entity}}> listAll() {
        TypedQuery<{{entity}}> q = em.createQuery("from " + {{entity}}.class.getSimpleName(), {{entity}}.class);
        return q.getResultList();
    }

    public {{entity}} persist({{entity}} e) {
        em.persist(e);
        return e;
    }

    public {{entity}} update({{entity}} e) {
        return em.merge(e);
    }

    public void delete(Long id) {
        {{entity}} e = em.find({{entity}}.class, id);
        if (e != null) em.remove(e);
    }
}
"#;

const DEFAULT_RESOURCE: &str = r#"package {{package}}.resources;

import jakarta.inject.Inject;
import jakarta.transaction.Transactional;
import jakarta.ws.rs.*;
import jakarta.ws.rs.core.MediaType;
import jakarta.ws.rs.core.Response;
import java.util.Collection;

import {{package}}.entities.{{entity}};
import {{package}}.repositories.{{entity}}Repository;

@Path("/{{path}}")
@Produces(MediaType.APPLICATION_JSON)
@Consumes(MediaType.APPLICATION_JSON)
public class {{entity}}Resource {

    @Inject
    {{entity}}Repository repo;

    @GET
    public Collection<{{entity}}> list() {
        return repo.listAll();
    }

    @GET
    @Path("/{id}")
    public {{entity}} get(@PathParam("id") Long id) {
        {{entity}} e = repo.find(id);
        if (e == null) throw new NotFoundException();
        return e;
    }

    @POST
    @Transactional
    public Response create({{entity}} e) {
        repo.persist(e);
        return Response.status(Response.Status.CREATED).entity(e).build();
    }

    @PUT
    @Path("/{id}")
    @Transactional
    public {{entity}} update(@PathParam("id") Long id, {{entity}} e) {
        e.setId(id);
        return repo.update(e);
    }

    @DELETE
    @Path("/{id}")
    @Transactional
    public void delete(@PathParam("id") Long id) {
        repo.delete(id);
    }
}
"#;

const DEFAULT_POM: &str = r#"<project xmlns="http://maven.apache.org/POM/4.0.0" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
         xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd">
  <modelVersion>4.0.0</modelVersion>
  <groupId>{{group_id}}</groupId>
  <artifactId>{{artifact_id}}</artifactId>
  <version>1.0-SNAPSHOT</version>
  <properties>
    <project.build.sourceEncoding>UTF-8</project.build.sourceEncoding>
    <quarkus.platform.group-id>io.quarkus</quarkus.platform.group-id>
    <quarkus.platform.artifact-id>quarkus-bom</quarkus.platform.artifact-id>
    <quarkus.platform.version>3.3.2.Final</quarkus.platform.version>
    <maven.compiler.source>17</maven.compiler.source>
    <maven.compiler.target>17</maven.compiler.target>
  </properties>

  <dependencyManagement>
    <dependencies>
      <dependency>
        <groupId>${quarkus.platform.group-id}</groupId>
        <artifactId>${quarkus.platform.artifact-id}</artifactId>
        <version>${quarkus.platform.version}</version>
        <type>pom</type>
        <scope>import</scope>
      </dependency>
    </dependencies>
  </dependencyManagement>

  <dependencies>
    <dependency>
      <groupId>io.quarkus</groupId>
      <artifactId>quarkus-resteasy-jackson</artifactId>
    </dependency>
    <dependency>
      <groupId>io.quarkus</groupId>
      <artifactId>quarkus-hibernate-orm</artifactId>
    </dependency>
    <dependency>
      <groupId>io.quarkus</groupId>
      <artifactId>quarkus-jdbc-postgresql</artifactId>
    </dependency>
  </dependencies>

  <build>
    <plugins>
      <plugin>
        <groupId>io.quarkus</groupId>
        <artifactId>quarkus-maven-plugin</artifactId>
        <version>${quarkus.platform.version}</version>
        <executions>
          <execution>
            <goals>
              <goal>build</goal>
            </goals>
          </execution>
        </executions>
      </plugin>
    </plugins>
  </build>
</project>
"#;

const DEFAULT_APPLICATION_PROPERTIES: &str = r#"# PostgreSQL datasource, replace the values below
quarkus.datasource.db-kind=postgresql
quarkus.datasource.username=youruser
quarkus.datasource.password=yourpassword
quarkus.datasource.jdbc.url=jdbc:postgresql://localhost:5432/yourdb

quarkus.hibernate-orm.database.generation=update
"#;

const DEFAULT_README: &str = r#"# {{artifact_id}}

Quarkus JPA project generated from an entity-relationship diagram.

Build:

    mvn package

Dev mode:

    mvn quarkus:dev

Database settings live in src/main/resources/application.properties.
"#;

#[derive(Debug, Clone, PartialEq)]
pub struct Templates {
    pub entity: String,
    pub repository: String,
    pub resource: String,
    pub pom: String,
    pub application_properties: String,
    pub readme: String,
}

impl Default for Templates {
    fn default() -> Self {
        Self {
            entity: DEFAULT_ENTITY.to_string(),
            repository: DEFAULT_REPOSITORY.to_string(),
            resource: DEFAULT_RESOURCE.to_string(),
            pom: DEFAULT_POM.to_string(),
            application_properties: DEFAULT_APPLICATION_PROPERTIES.to_string(),
            readme: DEFAULT_README.to_string(),
        }
    }
}

impl Templates {
    /// Reads `<dir>/<name>.tpl` for every template, first writing the
    /// built-in default for any that is missing.
    pub fn load(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir).map_err(|source| Error::Write {
            path: dir.to_path_buf(),
            source,
        })?;

        let defaults = Templates::default();
        Ok(Self {
            entity: load_or_init(dir, ENTITY, &defaults.entity)?,
            repository: load_or_init(dir, REPOSITORY, &defaults.repository)?,
            resource: load_or_init(dir, RESOURCE, &defaults.resource)?,
            pom: load_or_init(dir, POM, &defaults.pom)?,
            application_properties: load_or_init(
                dir,
                APPLICATION_PROPERTIES,
                &defaults.application_properties,
            )?,
            readme: load_or_init(dir, README, &defaults.readme)?,
        })
    }

    pub fn load_or_default(dir: Option<&Path>) -> Result<Self> {
        match dir {
            Some(dir) => Self::load(dir),
            None => Ok(Self::default()),
        }
    }
}

fn load_or_init(dir: &Path, name: &str, default: &str) -> Result<String> {
    let path = dir.join(format!("{name}.tpl"));
    if !path.exists() {
        info!(template = name, path = path.display().to_string(); "Writing default template");
        fs::write(&path, default).map_err(|source| Error::Write {
            path: path.clone(),
            source,
        })?;
    }
    debug!(template = name; "Loading template");
    fs::read_to_string(&path).map_err(|source| Error::Read { path, source })
}

/// Substitutes `{{key}}` for each pair; unknown placeholders stay as written.
pub fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    vars.iter().fold(template.to_string(), |text, (key, value)| {
        text.replace(&format!("{{{{{key}}}}}"), value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn fill_replaces_every_occurrence() {
        assert_eq!(
            fill("{{a}} and {{a}} then {{b}}", &[("a", "x"), ("b", "y")]),
            "x and x then y"
        );
    }

    #[test]
    fn fill_leaves_other_braces() {
        assert_eq!(
            fill("class {{name}} { ${maven.prop} {{other}} }", &[("name", "Book")]),
            "class Book { ${maven.prop} {{other}} }"
        );
    }

    #[test]
    fn load_materializes_missing_templates() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("readme.tpl"), "custom {{artifact_id}}\n").unwrap();

        let templates = Templates::load(dir.path()).unwrap();

        assert_eq!(templates.readme, "custom {{artifact_id}}\n");
        assert_eq!(templates.entity, DEFAULT_ENTITY);
        assert!(dir.path().join("entity.tpl").is_file());
        assert!(dir.path().join("application.properties.tpl").is_file());
    }

    #[test]
    fn load_or_default_without_dir() {
        assert_eq!(Templates::load_or_default(None).unwrap(), Templates::default());
    }
}
