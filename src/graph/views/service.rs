use super::{AnyEntity, Entity, File, Message, entity_view, import_files, merge_imports};
use crate::descriptor::MethodDescriptorProto;
use crate::error::OptionError;
use crate::graph::entity::{EMPTY_IDS, EMPTY_METHOD, KindData, MethodData};

entity_view! {
    /// A service.
    Service
}

entity_view! {
    /// An RPC method of a service.
    Method
}

impl<'g> Service<'g> {
    /// Methods in declaration order.
    pub fn methods(&self) -> Vec<Method<'g>> {
        let ids = match &self.graph.data(self.id).kind {
            KindData::Service(data) => &data.methods,
            _ => &EMPTY_IDS,
        };
        ids.iter().map(|&id| Method::new(self.graph, id)).collect()
    }

    /// Files (other than its own) that the methods' messages live in.
    pub fn imports(&self) -> Vec<File<'g>> {
        merge_imports(self.methods().iter().map(Method::imports))
    }

    /// Input and output messages of every method, and everything those
    /// messages depend on.
    pub fn dependencies(&self) -> Vec<AnyEntity<'g>> {
        self.graph
            .dependencies_of(self.id)
            .iter()
            .map(|&id| AnyEntity::new(self.graph, id))
            .collect()
    }

    pub fn service_options(&self) -> Result<prost_types::ServiceOptions, OptionError> {
        self.option_payload().standard()
    }

    pub fn deprecated(&self) -> bool {
        self.service_options().is_ok_and(|o| o.deprecated())
    }
}

impl<'g> Method<'g> {
    fn method_data(&self) -> &'g MethodData {
        match &self.graph.data(self.id).kind {
            KindData::Method(data) => data,
            _ => &EMPTY_METHOD,
        }
    }

    pub fn descriptor(&self) -> &'g MethodDescriptorProto {
        &self.method_data().descriptor
    }

    pub fn service(&self) -> Option<Service<'g>> {
        self.parent()?.as_service()
    }

    /// Request message; `None` only if it failed to resolve.
    pub fn input(&self) -> Option<Message<'g>> {
        self.method_data().input.map(|id| Message::new(self.graph, id))
    }

    /// Response message; `None` only if it failed to resolve.
    pub fn output(&self) -> Option<Message<'g>> {
        self.method_data().output.map(|id| Message::new(self.graph, id))
    }

    pub fn client_streaming(&self) -> bool {
        self.descriptor().client_streaming()
    }

    pub fn server_streaming(&self) -> bool {
        self.descriptor().server_streaming()
    }

    /// Files of the input and output messages, if not this method's file.
    pub fn imports(&self) -> Vec<File<'g>> {
        let own = self.graph.data(self.id).file;
        let data = self.method_data();
        import_files(self.graph, own, data.input.into_iter().chain(data.output))
    }

    pub fn method_options(&self) -> Result<prost_types::MethodOptions, OptionError> {
        self.option_payload().standard()
    }

    pub fn deprecated(&self) -> bool {
        self.method_options().is_ok_and(|o| o.deprecated())
    }
}
