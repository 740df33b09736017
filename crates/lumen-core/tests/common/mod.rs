//! Shared fixture: a miniature compositor protocol and a recording
//! connection that stands in for the session manager.

// Not every test binary touches every helper.
#![allow(dead_code)]

use std::{collections::VecDeque, os::fd::OwnedFd, sync::Arc};

use lumen_core::{compile, CompiledInterface, CompiledProtocol, Connection};
use lumen_proto::{GlobalId, ObjectId, OutgoingMessage, ProtocolError};
use lumen_transport::TransportError;

pub const SCHEMA: &str = r#"
<protocol name="lumen_shell">
  <interface name="lm_registry" version="1">
    <request name="bind">
      <arg name="name" type="uint"/>
      <arg name="id" type="new_id"/>
    </request>
    <event name="global">
      <arg name="name" type="uint"/>
      <arg name="interface" type="string"/>
      <arg name="version" type="uint"/>
    </event>
  </interface>
  <interface name="lm_surface" version="4">
    <request name="attach">
      <arg name="buffer" type="object" interface="lm_buffer" allow-null="true"/>
      <arg name="x" type="int"/>
      <arg name="y" type="int"/>
    </request>
    <request name="set_title" since="3">
      <arg name="title" type="string"/>
    </request>
    <request name="destroy"/>
    <event name="enter" since="2">
      <arg name="output" type="object" interface="lm_output"/>
    </event>
    <event name="frame_done">
      <arg name="time" type="uint"/>
    </event>
  </interface>
  <interface name="lm_output" version="3">
    <request name="release"/>
    <event name="scale">
      <arg name="factor" type="fixed"/>
    </event>
  </interface>
  <interface name="lm_shm" version="1">
    <request name="create_pool">
      <arg name="id" type="new_id" interface="lm_buffer"/>
      <arg name="fd" type="fd"/>
      <arg name="size" type="uint"/>
    </request>
  </interface>
  <interface name="lm_buffer" version="1">
    <request name="destroy"/>
  </interface>
  <interface name="lm_keyboard" version="2">
    <event name="keymap">
      <arg name="format" type="uint" enum="keymap_format"/>
      <arg name="fd" type="fd"/>
      <arg name="size" type="uint"/>
    </event>
    <enum name="keymap_format">
      <entry name="no_keymap" value="0"/>
      <entry name="xkb_v1" value="1"/>
    </enum>
  </interface>
  <interface name="lm_mirror" version="1">
    <request name="echo">
      <arg name="count" type="uint"/>
      <arg name="label" type="string"/>
      <arg name="scale" type="fixed"/>
      <arg name="blob" type="array"/>
      <arg name="delta" type="int"/>
    </request>
    <event name="echo">
      <arg name="count" type="uint"/>
      <arg name="label" type="string"/>
      <arg name="scale" type="fixed"/>
      <arg name="blob" type="array"/>
      <arg name="delta" type="int"/>
    </event>
    <event name="pair">
      <arg name="left" type="fd"/>
      <arg name="right" type="fd"/>
    </event>
  </interface>
</protocol>
"#;

pub fn fixture() -> CompiledProtocol {
    let ast = lumen_schema::parse(SCHEMA.as_bytes()).expect("fixture schema parses");
    compile(&ast).expect("fixture schema compiles")
}

pub fn interface(protocol: &CompiledProtocol, name: &str) -> Arc<CompiledInterface> {
    protocol.interface(name).expect("fixture interface exists").clone()
}

/// Stands in for the session manager: records every capability call.
#[derive(Default)]
pub struct TestConnection {
    pub sent: Vec<OutgoingMessage>,
    pub pending_fds: VecDeque<OwnedFd>,
    pub removed_objects: Vec<ObjectId>,
    pub removed_binds: Vec<(GlobalId, ObjectId)>,
}

impl TestConnection {
    pub fn with_pending_fd() -> Self {
        let mut conn = Self::default();
        conn.pending_fds.push_back(devnull());
        conn
    }
}

impl Connection for TestConnection {
    fn send_message(&mut self, message: OutgoingMessage) -> Result<(), TransportError> {
        self.sent.push(message);
        Ok(())
    }

    fn claim_fd(&mut self) -> Result<OwnedFd, ProtocolError> {
        self.pending_fds.pop_front().ok_or(ProtocolError::NoPendingFd)
    }

    fn remove_object(&mut self, object: ObjectId) {
        self.removed_objects.push(object);
    }

    fn remove_global_bind(&mut self, global: GlobalId, object: ObjectId) {
        self.removed_binds.push((global, object));
    }
}

pub fn devnull() -> OwnedFd {
    std::fs::File::open("/dev/null").expect("/dev/null opens").into()
}
